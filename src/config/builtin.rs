//! Built-in 2024/25 rate tables.
//!
//! These are compiled in so the engine works with zero setup. The files under
//! `config/2024-25/` describe the same tables.

use std::sync::LazyLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::types::{
    AllowanceTaper, ContributionRates, DeductionConfig, IncomeTaxConfig, LoanPlanTerms,
    RegionTables, StudentLoanTerms, TaxBand, TaxBandTable, TaxYearMetadata,
};

static BUILTIN: LazyLock<DeductionConfig> = LazyLock::new(tax_year_2024_25);

impl DeductionConfig {
    /// Returns the compiled-in 2024/25 tables.
    ///
    /// # Example
    ///
    /// ```
    /// use salary_engine::config::DeductionConfig;
    /// use salary_engine::models::TaxRegion;
    /// use rust_decimal::Decimal;
    ///
    /// let config = DeductionConfig::builtin();
    /// assert_eq!(config.metadata().label, "2024/25");
    /// assert_eq!(
    ///     config.tax_table(TaxRegion::Standard).personal_allowance,
    ///     Decimal::from(12_570)
    /// );
    /// ```
    pub fn builtin() -> &'static DeductionConfig {
        &BUILTIN
    }
}

fn band(name: &str, upper_threshold: Option<Decimal>, rate: Decimal) -> TaxBand {
    TaxBand {
        name: name.to_string(),
        upper_threshold,
        rate,
    }
}

fn tax_year_2024_25() -> DeductionConfig {
    let metadata = TaxYearMetadata {
        label: "2024/25".to_string(),
        start_date: NaiveDate::from_ymd_opt(2024, 4, 6).unwrap_or_default(),
        end_date: NaiveDate::from_ymd_opt(2025, 4, 5).unwrap_or_default(),
        source_url: "https://www.gov.uk/income-tax-rates".to_string(),
    };

    let income_tax = IncomeTaxConfig {
        taper: AllowanceTaper {
            threshold: dec!(100000),
            income_per_pound_withdrawn: dec!(2),
        },
        regions: RegionTables {
            standard: TaxBandTable {
                personal_allowance: dec!(12570),
                bands: vec![
                    band("basic", Some(dec!(50270)), dec!(0.20)),
                    band("higher", Some(dec!(125140)), dec!(0.40)),
                    band("additional", None, dec!(0.45)),
                ],
            },
            alternate: TaxBandTable {
                personal_allowance: dec!(12570),
                bands: vec![
                    band("starter", Some(dec!(14876)), dec!(0.19)),
                    band("basic", Some(dec!(26561)), dec!(0.20)),
                    band("intermediate", Some(dec!(43662)), dec!(0.21)),
                    band("higher", Some(dec!(75000)), dec!(0.42)),
                    band("advanced", Some(dec!(125140)), dec!(0.45)),
                    band("top", None, dec!(0.48)),
                ],
            },
        },
    };

    let contributions = ContributionRates {
        primary_threshold: dec!(12570),
        upper_earnings_limit: dec!(50270),
        main_rate: dec!(0.08),
        upper_rate: dec!(0.02),
    };

    let student_loans = StudentLoanTerms {
        plan_a: LoanPlanTerms {
            threshold: dec!(24990),
            rate: dec!(0.09),
        },
        plan_b: LoanPlanTerms {
            threshold: dec!(27295),
            rate: dec!(0.09),
        },
        plan_c: LoanPlanTerms {
            threshold: dec!(31395),
            rate: dec!(0.09),
        },
        postgraduate: LoanPlanTerms {
            threshold: dec!(21000),
            rate: dec!(0.06),
        },
    };

    DeductionConfig::new(metadata, income_tax, contributions, student_loans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StudentLoanPlan, TaxRegion};

    #[test]
    fn test_builtin_band_tables_are_well_formed() {
        let config = DeductionConfig::builtin();
        assert_eq!(config.tax_table(TaxRegion::Standard).validate(), Ok(()));
        assert_eq!(config.tax_table(TaxRegion::Alternate).validate(), Ok(()));
    }

    #[test]
    fn test_builtin_region_band_counts() {
        let config = DeductionConfig::builtin();
        assert_eq!(config.tax_table(TaxRegion::Standard).bands.len(), 3);
        assert_eq!(config.tax_table(TaxRegion::Alternate).bands.len(), 6);
    }

    #[test]
    fn test_builtin_tax_year_dates() {
        let metadata = DeductionConfig::builtin().metadata();
        assert_eq!(metadata.start_date, NaiveDate::from_ymd_opt(2024, 4, 6).unwrap());
        assert_eq!(metadata.end_date, NaiveDate::from_ymd_opt(2025, 4, 5).unwrap());
    }

    #[test]
    fn test_builtin_loan_and_contribution_rates() {
        let config = DeductionConfig::builtin();
        assert_eq!(config.loan_terms(StudentLoanPlan::PlanA).unwrap().threshold, dec!(24990));
        assert_eq!(config.loan_terms(StudentLoanPlan::PlanB).unwrap().threshold, dec!(27295));
        assert_eq!(config.contribution_rates().upper_earnings_limit, dec!(50270));
        assert_eq!(config.taper().threshold, dec!(100000));
    }
}
