//! Request types for the salary engine API.
//!
//! This module defines the JSON request bodies for the `/breakdown` and
//! `/budget` endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Outgoings, SalaryInput, StudentLoanPlan, TaxRegion};

/// Request body for the `/breakdown` endpoint.
///
/// Only `grossYearly` is required. Amounts may be sent as JSON numbers or
/// decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownRequest {
    /// Annual gross salary.
    pub gross_yearly: Decimal,
    /// Pension contribution percentage (default 0).
    #[serde(default)]
    pub pension_percent: Decimal,
    /// Tax region tag (default "standard").
    #[serde(default)]
    pub region: TaxRegion,
    /// Student loan plan tag (default "none").
    #[serde(default)]
    pub student_loan_plan: StudentLoanPlan,
}

impl From<BreakdownRequest> for SalaryInput {
    fn from(req: BreakdownRequest) -> Self {
        SalaryInput {
            gross_yearly: req.gross_yearly,
            pension_percent: req.pension_percent,
            region: req.region,
            student_loan_plan: req.student_loan_plan,
        }
    }
}

/// Request body for the `/budget` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetRequest {
    /// The salary whose monthly net pay is allocated.
    pub salary: BreakdownRequest,
    /// Monthly outgoings by category. Omitted categories count as zero.
    #[serde(default)]
    pub outgoings: Outgoings,
}
