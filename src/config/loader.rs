//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading deduction
//! tables from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::TaxRegion;

use super::types::{
    ContributionRates, DeductionConfig, IncomeTaxConfig, StudentLoanTerms, TaxYearMetadata,
};

/// Loads deduction tables from a configuration directory.
///
/// # Directory Structure
///
/// ```text
/// config/2024-25/
/// ├── tax_year.yaml       # Tax year label and dates
/// ├── income_tax.yaml     # Allowance taper and regional band tables
/// ├── contributions.yaml  # National Insurance thresholds and rates
/// └── student_loans.yaml  # Repayment terms per plan
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
///
/// let config = ConfigLoader::load("./config/2024-25")?;
/// println!("Loaded tax year: {}", config.metadata().label);
/// # Ok::<(), salary_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns the [`DeductionConfig`] on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or is missing a field (`ConfigParseError`)
    /// - A band table, the contribution rates or a loan plan is out of range (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<DeductionConfig> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<TaxYearMetadata>(&path.join("tax_year.yaml"))?;

        let income_tax_path = path.join("income_tax.yaml");
        let income_tax = Self::load_yaml::<IncomeTaxConfig>(&income_tax_path)?;
        Self::validate_income_tax(&income_tax, &income_tax_path)?;

        let contributions_path = path.join("contributions.yaml");
        let contributions = Self::load_yaml::<ContributionRates>(&contributions_path)?;
        contributions
            .validate()
            .map_err(|message| Self::invalid(&contributions_path, message))?;

        let student_loans_path = path.join("student_loans.yaml");
        let student_loans = Self::load_yaml::<StudentLoanTerms>(&student_loans_path)?;
        student_loans
            .validate()
            .map_err(|message| Self::invalid(&student_loans_path, message))?;

        debug!(
            path = %path.display(),
            tax_year = %metadata.label,
            "Loaded deduction configuration"
        );

        Ok(DeductionConfig::new(
            metadata,
            income_tax,
            contributions,
            student_loans,
        ))
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn invalid(path: &Path, message: String) -> EngineError {
        EngineError::InvalidConfig {
            path: path.display().to_string(),
            message,
        }
    }

    fn validate_income_tax(config: &IncomeTaxConfig, path: &Path) -> EngineResult<()> {
        let invalid = |message: String| Self::invalid(path, message);

        if config.taper.income_per_pound_withdrawn <= rust_decimal::Decimal::ZERO {
            return Err(invalid(
                "taper income_per_pound_withdrawn must be positive".to_string(),
            ));
        }

        for (region, table) in [
            (TaxRegion::Standard, &config.regions.standard),
            (TaxRegion::Alternate, &config.regions.alternate),
        ] {
            table
                .validate()
                .map_err(|message| invalid(format!("region '{}': {}", region, message)))?;
        }

        Ok(())
    }
}
