//! Breakdown orchestration.
//!
//! Combines pension, income tax, contribution and student loan into yearly
//! take-home figures and projects them to monthly and weekly periods.
//!
//! Tax is charged on gross less pension. Contribution and student loan are
//! charged on the full gross.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::config::DeductionConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, CalculationResult, PeriodBreakdown, SalaryBreakdown,
    SalaryInput, TakeHomeSummary, WEEKS_PER_YEAR,
};

use super::contribution::{calculate_contribution, compute_contribution};
use super::income_tax::{calculate_income_tax, compute_tax};
use super::rounding::{round_half_up, round_percent};
use super::student_loan::{calculate_repayment, compute_repayment};

/// Hours in a standard working week, used for the hourly figures.
pub const STANDARD_WEEKLY_HOURS: Decimal = Decimal::from_parts(375, 0, 0, false, 1);

/// Warning code raised when the personal allowance was reduced.
pub const WARNING_ALLOWANCE_TAPERED: &str = "PERSONAL_ALLOWANCE_TAPERED";

/// Warning code raised when the pension percentage is above 100.
pub const WARNING_PENSION_EXCEEDS_SALARY: &str = "PENSION_EXCEEDS_SALARY";

/// Warning code raised when deductions exceed gross pay.
pub const WARNING_NEGATIVE_NET_PAY: &str = "NEGATIVE_NET_PAY";

/// Largest accepted gross salary: £1,000,000,000,000.
///
/// Every intermediate amount stays well inside `Decimal`'s range below this.
pub const MAX_GROSS_YEARLY: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Largest accepted pension percentage.
pub const MAX_PENSION_PERCENT: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);

fn validate(input: &SalaryInput) -> EngineResult<()> {
    if input.gross_yearly <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "grossYearly",
            "must be greater than zero",
        ));
    }
    if input.gross_yearly > MAX_GROSS_YEARLY {
        return Err(EngineError::invalid_input(
            "grossYearly",
            format!("must not exceed {}", MAX_GROSS_YEARLY),
        ));
    }
    if input.pension_percent < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "pensionPercent",
            "must not be negative",
        ));
    }
    if input.pension_percent > MAX_PENSION_PERCENT {
        return Err(EngineError::invalid_input(
            "pensionPercent",
            format!("must not exceed {}", MAX_PENSION_PERCENT),
        ));
    }
    Ok(())
}

fn pension_deduction(input: &SalaryInput) -> Decimal {
    input.gross_yearly * input.pension_percent / Decimal::ONE_HUNDRED
}

fn yearly_record(
    gross: Decimal,
    pension_deduction: Decimal,
    tax: Decimal,
    contribution: Decimal,
    student_loan: Decimal,
) -> PeriodBreakdown {
    PeriodBreakdown {
        gross,
        tax,
        contribution,
        pension_deduction,
        student_loan,
        net: gross - pension_deduction - tax - contribution - student_loan,
    }
}

/// Computes yearly, monthly and weekly take-home figures.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when `gross_yearly` is not positive
/// or above [`MAX_GROSS_YEARLY`], or when `pension_percent` is negative or
/// above [`MAX_PENSION_PERCENT`].
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::compute_breakdown;
/// use salary_engine::config::DeductionConfig;
/// use salary_engine::models::SalaryInput;
/// use rust_decimal_macros::dec;
///
/// let breakdown = compute_breakdown(&SalaryInput::new(dec!(50270)), DeductionConfig::builtin())?;
/// assert_eq!(breakdown.yearly.tax, dec!(7540.00));
/// assert_eq!(breakdown.yearly.contribution, dec!(3016.00));
/// assert_eq!(breakdown.yearly.net, dec!(39714.00));
/// # Ok::<(), salary_engine::error::EngineError>(())
/// ```
pub fn compute_breakdown(
    input: &SalaryInput,
    config: &DeductionConfig,
) -> EngineResult<SalaryBreakdown> {
    validate(input)?;

    let gross = input.gross_yearly;
    let pension = pension_deduction(input);
    let tax = compute_tax(gross - pension, input.region, config);
    let contribution = compute_contribution(gross, config);
    let student_loan = compute_repayment(gross, input.student_loan_plan, config);

    Ok(SalaryBreakdown::from_yearly(yearly_record(
        gross,
        pension,
        tax,
        contribution,
        student_loan,
    )))
}

/// Derives the headline figures from a yearly record.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when `yearly.gross` is not positive
/// or the take-home percentage does not fit in a `Decimal`.
pub fn summarize(yearly: &PeriodBreakdown) -> EngineResult<TakeHomeSummary> {
    if yearly.gross <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "gross",
            "must be greater than zero",
        ));
    }

    let take_home_percent = yearly
        .net
        .checked_div(yearly.gross)
        .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| EngineError::invalid_input("net", "is too large relative to gross"))?;

    let yearly_hours = WEEKS_PER_YEAR * STANDARD_WEEKLY_HOURS;

    Ok(TakeHomeSummary {
        total_deductions: yearly.total_deductions(),
        take_home_percent: round_percent(take_home_percent),
        gross_hourly: round_half_up(yearly.gross / yearly_hours),
        net_hourly: round_half_up(yearly.net / yearly_hours),
    })
}

fn warning(code: &str, message: String, severity: &str) -> AuditWarning {
    AuditWarning {
        code: code.to_string(),
        message,
        severity: severity.to_string(),
    }
}

/// Calculates a breakdown with identifying metadata, summary and audit trace.
///
/// Runs the same arithmetic as [`compute_breakdown`] but records each step.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] under the same conditions as
/// [`compute_breakdown`].
pub fn calculate_breakdown(
    input: &SalaryInput,
    config: &DeductionConfig,
) -> EngineResult<CalculationResult> {
    let start_time = Instant::now();
    validate(input)?;

    let gross = input.gross_yearly;
    let mut steps: Vec<AuditStep> = Vec::with_capacity(5);
    let mut warnings: Vec<AuditWarning> = Vec::new();

    // Step 1: pension
    let pension = pension_deduction(input);
    let taxable_gross = gross - pension;
    steps.push(AuditStep {
        step_number: 1,
        rule_id: "pension_deduction".to_string(),
        rule_name: "Pre-tax Pension".to_string(),
        input: serde_json::json!({
            "gross_yearly": gross.to_string(),
            "pension_percent": input.pension_percent.to_string()
        }),
        output: serde_json::json!({
            "pension_deduction": pension.to_string(),
            "taxable_gross": taxable_gross.to_string()
        }),
        reasoning: format!(
            "£{} x {}% = £{} pension; taxable gross £{}",
            gross.normalize(),
            input.pension_percent.normalize(),
            pension.normalize(),
            taxable_gross.normalize()
        ),
    });

    if input.pension_percent > Decimal::ONE_HUNDRED {
        warnings.push(warning(
            WARNING_PENSION_EXCEEDS_SALARY,
            format!(
                "Pension of {}% exceeds gross salary",
                input.pension_percent.normalize()
            ),
            "high",
        ));
    }

    // Step 2: income tax
    let income_tax = calculate_income_tax(taxable_gross, input.region, config, 2);
    let base_allowance = config.tax_table(input.region).personal_allowance;
    if income_tax.personal_allowance < base_allowance {
        warnings.push(warning(
            WARNING_ALLOWANCE_TAPERED,
            format!(
                "Personal allowance reduced from £{} to £{}",
                base_allowance.normalize(),
                income_tax.personal_allowance.normalize()
            ),
            "low",
        ));
    }
    steps.push(income_tax.audit_step);

    // Step 3: contribution
    let contribution = calculate_contribution(gross, config, 3);
    steps.push(contribution.audit_step);

    // Step 4: student loan
    let student_loan = calculate_repayment(gross, input.student_loan_plan, config, 4);
    steps.push(student_loan.audit_step);

    // Step 5: net pay
    let yearly = yearly_record(
        gross,
        pension,
        income_tax.tax,
        contribution.contribution,
        student_loan.repayment,
    );
    steps.push(AuditStep {
        step_number: 5,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "gross": yearly.gross.to_string(),
            "pension_deduction": yearly.pension_deduction.to_string(),
            "tax": yearly.tax.to_string(),
            "contribution": yearly.contribution.to_string(),
            "student_loan": yearly.student_loan.to_string()
        }),
        output: serde_json::json!({
            "net": yearly.net.to_string()
        }),
        reasoning: format!(
            "£{} - £{} deductions = £{}",
            yearly.gross.normalize(),
            yearly.total_deductions().normalize(),
            yearly.net.normalize()
        ),
    });

    if yearly.net < Decimal::ZERO {
        warnings.push(warning(
            WARNING_NEGATIVE_NET_PAY,
            format!("Deductions exceed gross pay by £{}", (-yearly.net).normalize()),
            "high",
        ));
    }

    let summary = summarize(&yearly)?;
    let breakdown = SalaryBreakdown::from_yearly(yearly);
    let duration_us = start_time.elapsed().as_micros() as u64;

    debug!(
        gross = %gross,
        region = %input.region,
        net = %breakdown.yearly.net,
        warnings = warnings.len(),
        duration_us,
        "Breakdown calculated"
    );

    Ok(CalculationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        tax_year: config.metadata().label.clone(),
        input: input.clone(),
        breakdown,
        summary,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    })
}
