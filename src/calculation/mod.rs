//! Calculation logic for the salary engine.
//!
//! This module contains the deduction calculators (income tax, National
//! Insurance contribution, student loan repayment), the orchestrator that
//! combines them into a take-home breakdown, and the monthly budget planner.
//!
//! Each calculator has a `compute_*` function returning the rounded amount
//! and a `calculate_*` function that also returns an [`AuditStep`](crate::models::AuditStep).

mod breakdown;
mod budget;
mod contribution;
mod income_tax;
mod rounding;
mod student_loan;

pub use breakdown::{
    MAX_GROSS_YEARLY, MAX_PENSION_PERCENT, STANDARD_WEEKLY_HOURS, WARNING_ALLOWANCE_TAPERED,
    WARNING_NEGATIVE_NET_PAY, WARNING_PENSION_EXCEEDS_SALARY, calculate_breakdown,
    compute_breakdown, summarize,
};
pub use budget::plan_budget;
pub use contribution::{ContributionResult, calculate_contribution, compute_contribution};
pub use income_tax::{
    BandCharge, IncomeTaxResult, calculate_income_tax, compute_tax, tapered_personal_allowance,
};
pub use rounding::round_half_up;
pub use student_loan::{StudentLoanResult, calculate_repayment, compute_repayment};
