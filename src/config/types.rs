//! Configuration types for deduction calculations.
//!
//! This module contains the strongly-typed rate tables that drive the
//! calculators. They are either built in (see [`DeductionConfig::builtin`])
//! or deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{StudentLoanPlan, TaxRegion};

/// Metadata about the tax year the tables describe.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaxYearMetadata {
    /// Display label (e.g. "2024/25").
    pub label: String,
    /// First day of the tax year.
    pub start_date: NaiveDate,
    /// Last day of the tax year.
    pub end_date: NaiveDate,
    /// Where the rates were published.
    pub source_url: String,
}

/// High-income withdrawal of the personal allowance.
///
/// Identical for every region.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AllowanceTaper {
    /// Income above which the allowance starts to shrink.
    pub threshold: Decimal,
    /// Pounds of income above the threshold per pound of allowance withdrawn.
    pub income_per_pound_withdrawn: Decimal,
}

/// One marginal rate band of an income tax table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaxBand {
    /// Band name (e.g. "basic").
    pub name: String,
    /// Gross income at which this band ends; `None` for the top band.
    ///
    /// Income exactly at the threshold is taxed in this band.
    #[serde(default)]
    pub upper_threshold: Option<Decimal>,
    /// Marginal rate as a fraction (0.2 = 20%).
    pub rate: Decimal,
}

/// A region's personal allowance and ordered band list.
///
/// Bands run lowest first; only the last one is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaxBandTable {
    /// Tax-free allowance before any taper.
    pub personal_allowance: Decimal,
    /// Bands in ascending threshold order.
    pub bands: Vec<TaxBand>,
}

impl TaxBandTable {
    /// Checks the table shape. Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        let Some((top, lower)) = self.bands.split_last() else {
            return Err("band list is empty".to_string());
        };

        if top.upper_threshold.is_some() {
            return Err(format!("top band '{}' must not have an upper threshold", top.name));
        }

        if self.personal_allowance < Decimal::ZERO {
            return Err(format!(
                "personal allowance {} must not be negative",
                self.personal_allowance
            ));
        }

        let mut previous = self.personal_allowance;
        for band in lower {
            let threshold = band
                .upper_threshold
                .ok_or_else(|| format!("band '{}' is unbounded but is not the top band", band.name))?;
            if threshold <= previous {
                return Err(format!(
                    "band '{}' threshold {} must exceed {}",
                    band.name, threshold, previous
                ));
            }
            previous = threshold;
        }

        if let Some(band) = self
            .bands
            .iter()
            .find(|b| b.rate < Decimal::ZERO || b.rate > Decimal::ONE)
        {
            return Err(format!("band '{}' rate {} is outside 0..=1", band.name, band.rate));
        }

        Ok(())
    }
}

/// Band tables for each region.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegionTables {
    /// England, Wales and Northern Ireland.
    pub standard: TaxBandTable,
    /// Scotland.
    pub alternate: TaxBandTable,
}

/// Income tax configuration from income_tax.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IncomeTaxConfig {
    /// Personal allowance taper shared by all regions.
    pub taper: AllowanceTaper,
    /// Per-region band tables.
    pub regions: RegionTables,
}

/// National Insurance contribution rates from contributions.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContributionRates {
    /// Earnings at or below this pay nothing.
    pub primary_threshold: Decimal,
    /// Earnings above this are charged at `upper_rate`.
    pub upper_earnings_limit: Decimal,
    /// Rate between the primary threshold and the upper earnings limit.
    pub main_rate: Decimal,
    /// Rate above the upper earnings limit.
    pub upper_rate: Decimal,
}

impl ContributionRates {
    /// Checks that both thresholds are ordered and both rates are fractions.
    pub fn validate(&self) -> Result<(), String> {
        if self.primary_threshold < Decimal::ZERO {
            return Err(format!(
                "primary_threshold {} must not be negative",
                self.primary_threshold
            ));
        }
        if self.upper_earnings_limit <= self.primary_threshold {
            return Err(format!(
                "upper_earnings_limit {} must exceed primary_threshold {}",
                self.upper_earnings_limit, self.primary_threshold
            ));
        }
        check_rate("main_rate", self.main_rate)?;
        check_rate("upper_rate", self.upper_rate)
    }
}

fn check_rate(name: &str, rate: Decimal) -> Result<(), String> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(format!("{} {} is outside 0..=1", name, rate));
    }
    Ok(())
}

/// Repayment threshold and rate for one student loan plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LoanPlanTerms {
    /// Annual income at or below which nothing is repaid.
    pub threshold: Decimal,
    /// Rate charged on income above the threshold.
    pub rate: Decimal,
}

impl LoanPlanTerms {
    /// Checks the threshold is non-negative and the rate is a fraction.
    pub fn validate(&self) -> Result<(), String> {
        if self.threshold < Decimal::ZERO {
            return Err(format!("threshold {} must not be negative", self.threshold));
        }
        check_rate("rate", self.rate)
    }
}

/// Terms for every student loan plan, from student_loans.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StudentLoanTerms {
    /// Plan 1.
    pub plan_a: LoanPlanTerms,
    /// Plan 2.
    pub plan_b: LoanPlanTerms,
    /// Plan 4.
    pub plan_c: LoanPlanTerms,
    /// Postgraduate loan.
    pub postgraduate: LoanPlanTerms,
}

impl StudentLoanTerms {
    /// Validates every plan. Errors are prefixed with the plan tag.
    pub fn validate(&self) -> Result<(), String> {
        for plan in [
            StudentLoanPlan::PlanA,
            StudentLoanPlan::PlanB,
            StudentLoanPlan::PlanC,
            StudentLoanPlan::Postgraduate,
        ] {
            if let Some(terms) = self.terms(plan) {
                terms
                    .validate()
                    .map_err(|message| format!("plan '{}': {}", plan, message))?;
            }
        }
        Ok(())
    }

    /// Returns the terms for `plan`, or `None` when there is no loan.
    pub fn terms(&self, plan: StudentLoanPlan) -> Option<&LoanPlanTerms> {
        match plan {
            StudentLoanPlan::None => None,
            StudentLoanPlan::PlanA => Some(&self.plan_a),
            StudentLoanPlan::PlanB => Some(&self.plan_b),
            StudentLoanPlan::PlanC => Some(&self.plan_c),
            StudentLoanPlan::Postgraduate => Some(&self.postgraduate),
        }
    }
}

/// The complete set of tables used by the deduction engine.
///
/// Immutable once built; share it by reference or behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeductionConfig {
    /// Tax year metadata.
    metadata: TaxYearMetadata,
    /// Income tax tables.
    income_tax: IncomeTaxConfig,
    /// National Insurance rates.
    contributions: ContributionRates,
    /// Student loan plan terms.
    student_loans: StudentLoanTerms,
}

impl DeductionConfig {
    /// Creates a new DeductionConfig from its component parts.
    pub fn new(
        metadata: TaxYearMetadata,
        income_tax: IncomeTaxConfig,
        contributions: ContributionRates,
        student_loans: StudentLoanTerms,
    ) -> Self {
        Self {
            metadata,
            income_tax,
            contributions,
            student_loans,
        }
    }

    /// Returns the tax year metadata.
    pub fn metadata(&self) -> &TaxYearMetadata {
        &self.metadata
    }

    /// Returns the personal allowance taper.
    pub fn taper(&self) -> &AllowanceTaper {
        &self.income_tax.taper
    }

    /// Returns the band table for `region`.
    pub fn tax_table(&self, region: TaxRegion) -> &TaxBandTable {
        match region {
            TaxRegion::Standard => &self.income_tax.regions.standard,
            TaxRegion::Alternate => &self.income_tax.regions.alternate,
        }
    }

    /// Returns the National Insurance rates.
    pub fn contribution_rates(&self) -> &ContributionRates {
        &self.contributions
    }

    /// Returns the terms for `plan`, or `None` when there is no loan.
    pub fn loan_terms(&self, plan: StudentLoanPlan) -> Option<&LoanPlanTerms> {
        self.student_loans.terms(plan)
    }
}
