//! Salary Engine for UK take-home pay
//!
//! This crate calculates income tax, National Insurance contributions and
//! student loan repayments on an annual salary, projects the resulting
//! take-home pay to monthly and weekly periods, and allocates monthly net pay
//! across a household budget.
//!
//! # Example
//!
//! ```
//! use salary_engine::calculation::compute_breakdown;
//! use salary_engine::config::DeductionConfig;
//! use salary_engine::models::{SalaryInput, StudentLoanPlan};
//! use rust_decimal_macros::dec;
//!
//! let input = SalaryInput::new(dec!(30000)).with_student_loan_plan(StudentLoanPlan::PlanA);
//! let breakdown = compute_breakdown(&input, DeductionConfig::builtin())?;
//! assert_eq!(breakdown.yearly.student_loan, dec!(450.90));
//! # Ok::<(), salary_engine::error::EngineError>(())
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
