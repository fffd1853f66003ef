//! Monthly budget models.
//!
//! Outgoings are recorded per [`OutgoingsCategory`] and compared against
//! monthly take-home pay by the budget planner.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A spending category in the monthly budget.
///
/// Categories order as declared, which is the order budgets are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutgoingsCategory {
    /// Rent or mortgage payments.
    RentMortgage,
    /// Council tax.
    CouncilTax,
    /// Car finance, fuel and running costs.
    Car,
    /// Insurance premiums.
    Insurances,
    /// Credit card repayments.
    CreditCards,
    /// Electricity bills.
    Electricity,
    /// Gas bills.
    Gas,
    /// Groceries.
    Food,
    /// Entertainment.
    Entertainment,
    /// Clothing.
    Clothing,
    /// Streaming and other online subscriptions.
    OnlineSubscriptions,
    /// Savings and investments.
    SavingsInvestments,
    /// Holidays.
    Holidays,
    /// Childcare.
    Childcare,
    /// Public transport.
    PublicTransport,
    /// Anything else.
    Other,
}

impl OutgoingsCategory {
    /// Every category, in reporting order.
    pub const ALL: [OutgoingsCategory; 16] = [
        OutgoingsCategory::RentMortgage,
        OutgoingsCategory::CouncilTax,
        OutgoingsCategory::Car,
        OutgoingsCategory::Insurances,
        OutgoingsCategory::CreditCards,
        OutgoingsCategory::Electricity,
        OutgoingsCategory::Gas,
        OutgoingsCategory::Food,
        OutgoingsCategory::Entertainment,
        OutgoingsCategory::Clothing,
        OutgoingsCategory::OnlineSubscriptions,
        OutgoingsCategory::SavingsInvestments,
        OutgoingsCategory::Holidays,
        OutgoingsCategory::Childcare,
        OutgoingsCategory::PublicTransport,
        OutgoingsCategory::Other,
    ];

    /// Human-readable category name.
    pub fn label(&self) -> &'static str {
        match self {
            OutgoingsCategory::RentMortgage => "Rent/Mortgage",
            OutgoingsCategory::CouncilTax => "Council Tax",
            OutgoingsCategory::Car => "Car",
            OutgoingsCategory::Insurances => "Insurances",
            OutgoingsCategory::CreditCards => "Credit Cards",
            OutgoingsCategory::Electricity => "Electricity",
            OutgoingsCategory::Gas => "Gas",
            OutgoingsCategory::Food => "Food",
            OutgoingsCategory::Entertainment => "Entertainment",
            OutgoingsCategory::Clothing => "Clothing",
            OutgoingsCategory::OnlineSubscriptions => "Online Subscriptions",
            OutgoingsCategory::SavingsInvestments => "Savings/Investments",
            OutgoingsCategory::Holidays => "Holidays",
            OutgoingsCategory::Childcare => "Childcare",
            OutgoingsCategory::PublicTransport => "Public Transport",
            OutgoingsCategory::Other => "Other",
        }
    }
}

/// Monthly amounts keyed by category. Missing categories count as zero.
pub type Outgoings = BTreeMap<OutgoingsCategory, Decimal>;

/// Whether net pay covers the outgoings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// Money is left over.
    Surplus,
    /// Outgoings exactly match net pay.
    Balanced,
    /// Outgoings exceed net pay.
    Deficit,
}

/// One non-zero line of the budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAllocation {
    /// The spending category.
    pub category: OutgoingsCategory,
    /// Display name of the category.
    pub label: String,
    /// Monthly amount.
    pub amount: Decimal,
    /// Amount as a percentage of monthly net pay, to one decimal place.
    pub share_of_net_percent: Decimal,
}

/// The outcome of allocating monthly net pay across outgoings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    /// Monthly take-home pay being allocated.
    pub monthly_net: Decimal,
    /// Sum of all outgoings.
    pub total_outgoings: Decimal,
    /// Net pay left after outgoings; negative when over budget.
    pub remaining: Decimal,
    /// Surplus, balanced or deficit.
    pub status: BudgetStatus,
    /// Non-zero outgoings in category order.
    pub allocations: Vec<BudgetAllocation>,
}
