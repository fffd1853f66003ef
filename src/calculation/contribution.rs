//! National Insurance contribution calculation.
//!
//! Contributions are charged on gross salary (before pension) at the main
//! rate between the primary threshold and the upper earnings limit, and at
//! the upper rate on everything above the limit.

use rust_decimal::Decimal;

use crate::config::{ContributionRates, DeductionConfig};
use crate::models::AuditStep;

use super::rounding::round_half_up;

/// The result of a contribution calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct ContributionResult {
    /// Contribution owed, rounded to the penny.
    pub contribution: Decimal,
    /// Earnings charged at the main rate.
    pub main_band_earnings: Decimal,
    /// Earnings charged at the upper rate.
    pub upper_band_earnings: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

struct Split {
    main: Decimal,
    upper: Decimal,
}

fn split_earnings(gross_yearly: Decimal, rates: &ContributionRates) -> Split {
    if gross_yearly <= rates.primary_threshold {
        return Split {
            main: Decimal::ZERO,
            upper: Decimal::ZERO,
        };
    }

    Split {
        main: gross_yearly.min(rates.upper_earnings_limit) - rates.primary_threshold,
        upper: (gross_yearly - rates.upper_earnings_limit).max(Decimal::ZERO),
    }
}

fn charge(split: &Split, rates: &ContributionRates) -> Decimal {
    round_half_up(split.main * rates.main_rate + split.upper * rates.upper_rate)
}

/// Computes the yearly contribution owed on `gross_yearly`.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::compute_contribution;
/// use salary_engine::config::DeductionConfig;
/// use rust_decimal_macros::dec;
///
/// let config = DeductionConfig::builtin();
/// assert_eq!(compute_contribution(dec!(12570), config), dec!(0));
/// assert_eq!(compute_contribution(dec!(50270), config), dec!(3016.00));
/// assert_eq!(compute_contribution(dec!(130000), config), dec!(4610.60));
/// ```
pub fn compute_contribution(gross_yearly: Decimal, config: &DeductionConfig) -> Decimal {
    let rates = config.contribution_rates();
    charge(&split_earnings(gross_yearly, rates), rates)
}

/// Calculates the yearly contribution and records how it was derived.
///
/// # Arguments
///
/// * `gross_yearly` - Gross salary before pension
/// * `config` - The deduction tables
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_contribution(
    gross_yearly: Decimal,
    config: &DeductionConfig,
    step_number: u32,
) -> ContributionResult {
    let rates = config.contribution_rates();
    let split = split_earnings(gross_yearly, rates);
    let contribution = charge(&split, rates);

    let reasoning = if split.main.is_zero() {
        format!(
            "Gross £{} does not exceed the primary threshold of £{} - no contribution due",
            gross_yearly.normalize(),
            rates.primary_threshold.normalize()
        )
    } else {
        format!(
            "£{} at {}% + £{} at {}% = £{}",
            split.main.normalize(),
            (rates.main_rate * Decimal::ONE_HUNDRED).normalize(),
            split.upper.normalize(),
            (rates.upper_rate * Decimal::ONE_HUNDRED).normalize(),
            contribution
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "national_insurance".to_string(),
        rule_name: "National Insurance Contribution".to_string(),
        input: serde_json::json!({
            "gross_yearly": gross_yearly.to_string(),
            "primary_threshold": rates.primary_threshold.to_string(),
            "upper_earnings_limit": rates.upper_earnings_limit.to_string()
        }),
        output: serde_json::json!({
            "main_band_earnings": split.main.to_string(),
            "upper_band_earnings": split.upper.to_string(),
            "contribution": contribution.to_string()
        }),
        reasoning,
    };

    ContributionResult {
        contribution,
        main_band_earnings: split.main,
        upper_band_earnings: split.upper,
        audit_step,
    }
}
