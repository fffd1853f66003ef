//! Configuration loading and management for the salary engine.
//!
//! The engine ships with compiled-in 2024/25 tables
//! ([`DeductionConfig::builtin`]); a directory of YAML files can replace them.
//!
//! # Example
//!
//! ```no_run
//! use salary_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/2024-25").unwrap();
//! println!("Loaded tax year: {}", config.metadata().label);
//! ```

mod builtin;
mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AllowanceTaper, ContributionRates, DeductionConfig, IncomeTaxConfig, LoanPlanTerms,
    RegionTables, StudentLoanTerms, TaxBand, TaxBandTable, TaxYearMetadata,
};
