//! Monthly budget planning.
//!
//! Allocates monthly take-home pay across fixed spending categories.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{BudgetAllocation, BudgetStatus, BudgetSummary, Outgoings};

use super::rounding::round_percent;

/// Percentage of `monthly_net` taken by `amount`, zero when there is no net pay.
fn share_of_net(amount: Decimal, monthly_net: Decimal) -> Option<Decimal> {
    if monthly_net <= Decimal::ZERO {
        return Some(Decimal::ZERO);
    }
    amount
        .checked_div(monthly_net)
        .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
        .map(round_percent)
}

/// Allocates `monthly_net` across `outgoings`.
///
/// Categories with a zero amount are left out of the allocations. Shares are
/// zero when there is no positive net pay to share.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] naming the first category with a
/// negative amount, or when the totals or shares do not fit in a `Decimal`.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::plan_budget;
/// use salary_engine::models::{BudgetStatus, Outgoings, OutgoingsCategory};
/// use rust_decimal_macros::dec;
///
/// let mut outgoings = Outgoings::new();
/// outgoings.insert(OutgoingsCategory::RentMortgage, dec!(1000));
/// outgoings.insert(OutgoingsCategory::Food, dec!(300));
///
/// let budget = plan_budget(dec!(2500), &outgoings)?;
/// assert_eq!(budget.remaining, dec!(1200));
/// assert_eq!(budget.status, BudgetStatus::Surplus);
/// assert_eq!(budget.allocations[0].share_of_net_percent, dec!(40.0));
/// # Ok::<(), salary_engine::error::EngineError>(())
/// ```
pub fn plan_budget(monthly_net: Decimal, outgoings: &Outgoings) -> EngineResult<BudgetSummary> {
    if let Some((category, amount)) = outgoings.iter().find(|(_, amount)| **amount < Decimal::ZERO) {
        return Err(EngineError::invalid_input(
            "outgoings",
            format!("{} must not be negative (got {})", category.label(), amount),
        ));
    }

    let total_outgoings = outgoings
        .values()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(*amount))
        .ok_or_else(|| EngineError::invalid_input("outgoings", "total is too large"))?;
    let remaining = monthly_net
        .checked_sub(total_outgoings)
        .ok_or_else(|| EngineError::invalid_input("outgoings", "total is too large"))?;

    let status = if remaining > Decimal::ZERO {
        BudgetStatus::Surplus
    } else if remaining < Decimal::ZERO {
        BudgetStatus::Deficit
    } else {
        BudgetStatus::Balanced
    };

    let allocations = outgoings
        .iter()
        .filter(|(_, amount)| **amount > Decimal::ZERO)
        .map(|(category, amount)| {
            Ok(BudgetAllocation {
                category: *category,
                label: category.label().to_string(),
                amount: *amount,
                share_of_net_percent: share_of_net(*amount, monthly_net).ok_or_else(|| {
                    EngineError::invalid_input(
                        "outgoings",
                        format!("{} is too large relative to net pay", category.label()),
                    )
                })?,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    Ok(BudgetSummary {
        monthly_net,
        total_outgoings,
        remaining,
        status,
        allocations,
    })
}
