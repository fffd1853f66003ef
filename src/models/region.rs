//! Tax region and student loan plan selectors.
//!
//! Both are closed enums: an unrecognised tag can only arise when parsing
//! text, which fails with [`EngineError::UnknownConfiguration`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Selects which income tax band table applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaxRegion {
    /// England, Wales and Northern Ireland.
    #[default]
    #[serde(rename = "standard", alias = "uk")]
    Standard,
    /// Scotland, which sets its own bands on the same allowance.
    #[serde(rename = "alternate", alias = "scotland")]
    Alternate,
}

impl TaxRegion {
    /// Returns the tag used in requests and configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxRegion::Standard => "standard",
            TaxRegion::Alternate => "alternate",
        }
    }
}

impl fmt::Display for TaxRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaxRegion {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" | "uk" => Ok(TaxRegion::Standard),
            "alternate" | "scotland" => Ok(TaxRegion::Alternate),
            _ => Err(EngineError::UnknownConfiguration {
                kind: "tax region".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// The student loan plan a salary is repaying, if any.
///
/// # Example
///
/// ```
/// use salary_engine::models::StudentLoanPlan;
///
/// let plan: StudentLoanPlan = "plan1".parse().unwrap();
/// assert_eq!(plan, StudentLoanPlan::PlanA);
/// assert!("plan9".parse::<StudentLoanPlan>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StudentLoanPlan {
    /// No student loan.
    #[default]
    #[serde(rename = "none")]
    None,
    /// Plan 1: started university before 2012.
    #[serde(rename = "planA", alias = "plan1")]
    PlanA,
    /// Plan 2: started university in England or Wales from 2012.
    #[serde(rename = "planB", alias = "plan2")]
    PlanB,
    /// Plan 4: Scottish (SAAS) loans.
    #[serde(rename = "planC", alias = "plan4")]
    PlanC,
    /// Postgraduate master's or doctoral loan.
    #[serde(rename = "postgrad", alias = "postgraduate")]
    Postgraduate,
}

impl StudentLoanPlan {
    /// Returns the tag used in requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentLoanPlan::None => "none",
            StudentLoanPlan::PlanA => "planA",
            StudentLoanPlan::PlanB => "planB",
            StudentLoanPlan::PlanC => "planC",
            StudentLoanPlan::Postgraduate => "postgrad",
        }
    }
}

impl fmt::Display for StudentLoanPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudentLoanPlan {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(StudentLoanPlan::None),
            "plana" | "plan1" => Ok(StudentLoanPlan::PlanA),
            "planb" | "plan2" => Ok(StudentLoanPlan::PlanB),
            "planc" | "plan4" => Ok(StudentLoanPlan::PlanC),
            "postgrad" | "postgraduate" => Ok(StudentLoanPlan::Postgraduate),
            _ => Err(EngineError::UnknownConfiguration {
                kind: "student loan plan".to_string(),
                value: s.to_string(),
            }),
        }
    }
}
