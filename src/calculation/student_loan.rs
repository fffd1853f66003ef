//! Student loan repayment calculation.
//!
//! Repayments are a flat rate on gross salary (before pension) above the
//! plan's threshold.

use rust_decimal::Decimal;

use crate::config::{DeductionConfig, LoanPlanTerms};
use crate::models::{AuditStep, StudentLoanPlan};

use super::rounding::round_half_up;

/// The result of a repayment calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct StudentLoanResult {
    /// Yearly repayment, rounded to the penny.
    pub repayment: Decimal,
    /// The terms that applied, if the plan has any.
    pub terms: Option<LoanPlanTerms>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

fn repayment_for(gross_yearly: Decimal, terms: Option<&LoanPlanTerms>) -> Decimal {
    match terms {
        Some(terms) if gross_yearly > terms.threshold => {
            round_half_up((gross_yearly - terms.threshold) * terms.rate)
        }
        _ => Decimal::ZERO,
    }
}

/// Computes the yearly repayment owed under `plan`.
///
/// Returns zero for [`StudentLoanPlan::None`] and for salaries at or below
/// the plan threshold.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::compute_repayment;
/// use salary_engine::config::DeductionConfig;
/// use salary_engine::models::StudentLoanPlan;
/// use rust_decimal_macros::dec;
///
/// let config = DeductionConfig::builtin();
/// assert_eq!(compute_repayment(dec!(30000), StudentLoanPlan::PlanA, config), dec!(450.90));
/// assert_eq!(compute_repayment(dec!(30000), StudentLoanPlan::None, config), dec!(0));
/// ```
pub fn compute_repayment(
    gross_yearly: Decimal,
    plan: StudentLoanPlan,
    config: &DeductionConfig,
) -> Decimal {
    repayment_for(gross_yearly, config.loan_terms(plan))
}

/// Calculates the yearly repayment and records how it was derived.
pub fn calculate_repayment(
    gross_yearly: Decimal,
    plan: StudentLoanPlan,
    config: &DeductionConfig,
    step_number: u32,
) -> StudentLoanResult {
    let terms = config.loan_terms(plan);
    let repayment = repayment_for(gross_yearly, terms);

    let reasoning = match terms {
        None => "No student loan plan - no repayment".to_string(),
        Some(t) if gross_yearly <= t.threshold => format!(
            "Gross £{} does not exceed the {} threshold of £{} - no repayment",
            gross_yearly.normalize(),
            plan,
            t.threshold.normalize()
        ),
        Some(t) => format!(
            "(£{} - £{}) at {}% = £{}",
            gross_yearly.normalize(),
            t.threshold.normalize(),
            (t.rate * Decimal::ONE_HUNDRED).normalize(),
            repayment
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "student_loan".to_string(),
        rule_name: "Student Loan Repayment".to_string(),
        input: serde_json::json!({
            "gross_yearly": gross_yearly.to_string(),
            "plan": plan.as_str(),
            "threshold": terms.map(|t| t.threshold.to_string()),
            "rate": terms.map(|t| t.rate.to_string())
        }),
        output: serde_json::json!({
            "repayment": repayment.to_string()
        }),
        reasoning,
    };

    StudentLoanResult {
        repayment,
        terms: terms.copied(),
        audit_step,
    }
}
