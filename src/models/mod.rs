//! Core data models for the salary engine.
//!
//! This module contains all the domain models used throughout the engine.

mod breakdown;
mod budget;
mod calculation_result;
mod region;

pub use breakdown::{
    MONTHS_PER_YEAR, PeriodBreakdown, SalaryBreakdown, SalaryInput, TakeHomeSummary,
    WEEKS_PER_YEAR,
};
pub use budget::{BudgetAllocation, BudgetStatus, BudgetSummary, Outgoings, OutgoingsCategory};
pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, CalculationResult};
pub use region::{StudentLoanPlan, TaxRegion};
