//! Salary input and breakdown models.
//!
//! A [`SalaryBreakdown`] holds the yearly figures produced by the deduction
//! engine and their monthly and weekly projections.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{StudentLoanPlan, TaxRegion};

/// Number of pay months in a year.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Number of pay weeks in a year.
pub const WEEKS_PER_YEAR: Decimal = Decimal::from_parts(52, 0, 0, false, 0);

/// The inputs to a single breakdown calculation.
///
/// # Example
///
/// ```
/// use salary_engine::models::{SalaryInput, StudentLoanPlan, TaxRegion};
/// use rust_decimal::Decimal;
///
/// let input = SalaryInput::new(Decimal::from(50_000))
///     .with_pension_percent(Decimal::from(5))
///     .with_region(TaxRegion::Alternate)
///     .with_student_loan_plan(StudentLoanPlan::PlanB);
/// assert_eq!(input.region, TaxRegion::Alternate);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryInput {
    /// Annual gross salary.
    pub gross_yearly: Decimal,
    /// Pre-tax pension contribution as a percentage of gross salary.
    #[serde(default)]
    pub pension_percent: Decimal,
    /// The tax region whose bands apply.
    #[serde(default)]
    pub region: TaxRegion,
    /// The student loan plan being repaid.
    #[serde(default)]
    pub student_loan_plan: StudentLoanPlan,
}

impl SalaryInput {
    /// Creates an input with no pension, standard region and no student loan.
    pub fn new(gross_yearly: Decimal) -> Self {
        Self {
            gross_yearly,
            pension_percent: Decimal::ZERO,
            region: TaxRegion::Standard,
            student_loan_plan: StudentLoanPlan::None,
        }
    }

    /// Sets the pension contribution percentage.
    pub fn with_pension_percent(mut self, pension_percent: Decimal) -> Self {
        self.pension_percent = pension_percent;
        self
    }

    /// Sets the tax region.
    pub fn with_region(mut self, region: TaxRegion) -> Self {
        self.region = region;
        self
    }

    /// Sets the student loan plan.
    pub fn with_student_loan_plan(mut self, plan: StudentLoanPlan) -> Self {
        self.student_loan_plan = plan;
        self
    }
}

/// The amounts for one pay period.
///
/// Invariant: `net = gross - pension_deduction - tax - contribution - student_loan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBreakdown {
    /// Gross pay before any deduction.
    pub gross: Decimal,
    /// Income tax.
    pub tax: Decimal,
    /// National Insurance contribution.
    pub contribution: Decimal,
    /// Pre-tax pension deduction.
    pub pension_deduction: Decimal,
    /// Student loan repayment.
    pub student_loan: Decimal,
    /// Take-home pay.
    pub net: Decimal,
}

impl PeriodBreakdown {
    /// Sum of every deduction taken from gross pay.
    pub fn total_deductions(&self) -> Decimal {
        self.tax + self.contribution + self.student_loan + self.pension_deduction
    }

    /// Divides every component by `periods`.
    ///
    /// No re-rounding happens here; the yearly figures are already rounded.
    pub fn divided_by(&self, periods: Decimal) -> PeriodBreakdown {
        PeriodBreakdown {
            gross: self.gross / periods,
            tax: self.tax / periods,
            contribution: self.contribution / periods,
            pension_deduction: self.pension_deduction / periods,
            student_loan: self.student_loan / periods,
            net: self.net / periods,
        }
    }
}

/// Yearly figures projected to monthly and weekly pay periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// Annual amounts.
    pub yearly: PeriodBreakdown,
    /// Annual amounts divided by 12.
    pub monthly: PeriodBreakdown,
    /// Annual amounts divided by 52.
    pub weekly: PeriodBreakdown,
}

impl SalaryBreakdown {
    /// Builds the monthly and weekly projections from the yearly figures.
    pub fn from_yearly(yearly: PeriodBreakdown) -> Self {
        let monthly = yearly.divided_by(MONTHS_PER_YEAR);
        let weekly = yearly.divided_by(WEEKS_PER_YEAR);
        Self {
            yearly,
            monthly,
            weekly,
        }
    }
}

/// Headline figures derived from a yearly breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeHomeSummary {
    /// Tax, contribution, student loan and pension combined.
    pub total_deductions: Decimal,
    /// Net pay as a percentage of gross, to one decimal place.
    pub take_home_percent: Decimal,
    /// Gross pay per hour at a standard working week.
    pub gross_hourly: Decimal,
    /// Net pay per hour at a standard working week.
    pub net_hourly: Decimal,
}
