//! Income tax calculation functionality.
//!
//! This module applies a region's progressive band table to the taxable
//! gross (salary after pre-tax pension).
//!
//! ## Method
//!
//! 1. The personal allowance is tapered by £1 for every £2 of income above
//!    £100,000, down to zero.
//! 2. Band boundaries are expressed relative to taxable income as
//!    `threshold - allowance`.
//! 3. Income is peeled off from the highest boundary downwards; the portion
//!    above each boundary is charged at the rate of the band above it, and the
//!    lowest band absorbs the rest.
//!
//! Both regions share this routine; only the band table differs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{AllowanceTaper, DeductionConfig, TaxBand, TaxBandTable};
use crate::models::{AuditStep, TaxRegion};

use super::rounding::round_half_up;

/// Income charged within one band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandCharge {
    /// The band name (e.g. "higher").
    pub band: String,
    /// The band's marginal rate.
    pub rate: Decimal,
    /// Taxable income falling in the band.
    pub taxable_amount: Decimal,
    /// `taxable_amount * rate`, unrounded.
    pub tax: Decimal,
}

impl BandCharge {
    fn new(band: &TaxBand, taxable_amount: Decimal) -> Self {
        Self {
            band: band.name.clone(),
            rate: band.rate,
            taxable_amount,
            tax: taxable_amount * band.rate,
        }
    }
}

/// The result of an income tax calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct IncomeTaxResult {
    /// Tax owed, rounded to the penny.
    pub tax: Decimal,
    /// The personal allowance after taper.
    pub personal_allowance: Decimal,
    /// Taxable gross less the allowance, floored at zero.
    pub taxable_income: Decimal,
    /// Charges per band, lowest band first. Empty bands are omitted.
    pub band_charges: Vec<BandCharge>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the personal allowance left after the high-income taper.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::tapered_personal_allowance;
/// use salary_engine::config::DeductionConfig;
/// use salary_engine::models::TaxRegion;
/// use rust_decimal_macros::dec;
///
/// let config = DeductionConfig::builtin();
/// let table = config.tax_table(TaxRegion::Standard);
///
/// assert_eq!(tapered_personal_allowance(dec!(100000), table, config.taper()), dec!(12570));
/// assert_eq!(tapered_personal_allowance(dec!(110000), table, config.taper()), dec!(7570));
/// assert_eq!(tapered_personal_allowance(dec!(130000), table, config.taper()), dec!(0));
/// ```
pub fn tapered_personal_allowance(
    taxable_gross: Decimal,
    table: &TaxBandTable,
    taper: &AllowanceTaper,
) -> Decimal {
    if taxable_gross <= taper.threshold {
        return table.personal_allowance;
    }

    let reduction = (taxable_gross - taper.threshold) / taper.income_per_pound_withdrawn;
    (table.personal_allowance - reduction).max(Decimal::ZERO)
}

/// Splits taxable income across the bands, lowest band first.
fn peel_bands(taxable_income: Decimal, allowance: Decimal, bands: &[TaxBand]) -> Vec<BandCharge> {
    let mut remaining = taxable_income;
    let mut charges = Vec::with_capacity(bands.len());

    for pair in bands.windows(2).rev() {
        let (below, above) = (&pair[0], &pair[1]);
        let Some(threshold) = below.upper_threshold else {
            continue;
        };

        let boundary = threshold - allowance;
        if remaining > boundary {
            charges.push(BandCharge::new(above, remaining - boundary));
            remaining = boundary;
        }
    }

    if let Some(lowest) = bands.first()
        && remaining > Decimal::ZERO
    {
        charges.push(BandCharge::new(lowest, remaining));
    }

    charges.reverse();
    charges
}

struct Assessment {
    personal_allowance: Decimal,
    taxable_income: Decimal,
    band_charges: Vec<BandCharge>,
    tax: Decimal,
}

fn assess(taxable_gross: Decimal, table: &TaxBandTable, taper: &AllowanceTaper) -> Assessment {
    let personal_allowance = tapered_personal_allowance(taxable_gross, table, taper);
    let taxable_income = taxable_gross
        .checked_sub(personal_allowance)
        .unwrap_or(Decimal::ZERO);

    if taxable_income <= Decimal::ZERO {
        return Assessment {
            personal_allowance,
            taxable_income: Decimal::ZERO,
            band_charges: Vec::new(),
            tax: Decimal::ZERO,
        };
    }

    let band_charges = peel_bands(taxable_income, personal_allowance, &table.bands);
    let tax = round_half_up(band_charges.iter().map(|c| c.tax).sum());

    Assessment {
        personal_allowance,
        taxable_income,
        band_charges,
        tax,
    }
}

/// Computes income tax owed on `taxable_gross` in `region`.
///
/// Income exactly at a band threshold is taxed at the lower band's rate.
/// The result is never negative and is rounded half-up to the penny.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::compute_tax;
/// use salary_engine::config::DeductionConfig;
/// use salary_engine::models::TaxRegion;
/// use rust_decimal_macros::dec;
///
/// let config = DeductionConfig::builtin();
/// assert_eq!(compute_tax(dec!(50270), TaxRegion::Standard, config), dec!(7540.00));
/// assert_eq!(compute_tax(dec!(30000), TaxRegion::Alternate, config), dec!(3497.33));
/// assert_eq!(compute_tax(dec!(12570), TaxRegion::Standard, config), dec!(0));
/// ```
pub fn compute_tax(taxable_gross: Decimal, region: TaxRegion, config: &DeductionConfig) -> Decimal {
    assess(taxable_gross, config.tax_table(region), config.taper()).tax
}

/// Calculates income tax and records how it was derived.
///
/// # Arguments
///
/// * `taxable_gross` - Gross salary less pre-tax pension
/// * `region` - The region whose bands apply
/// * `config` - The deduction tables
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_income_tax(
    taxable_gross: Decimal,
    region: TaxRegion,
    config: &DeductionConfig,
    step_number: u32,
) -> IncomeTaxResult {
    let table = config.tax_table(region);
    let assessment = assess(taxable_gross, table, config.taper());

    let reasoning = if assessment.band_charges.is_empty() {
        format!(
            "Taxable gross £{} is within the personal allowance of £{} - no tax due",
            taxable_gross.normalize(),
            assessment.personal_allowance.normalize()
        )
    } else {
        let parts: Vec<String> = assessment
            .band_charges
            .iter()
            .map(|c| {
                format!(
                    "£{} at {}% ({})",
                    c.taxable_amount.normalize(),
                    (c.rate * Decimal::ONE_HUNDRED).normalize(),
                    c.band
                )
            })
            .collect();
        format!(
            "Allowance £{}; {} = £{}",
            assessment.personal_allowance.normalize(),
            parts.join(" + "),
            assessment.tax
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "Income Tax".to_string(),
        input: serde_json::json!({
            "taxable_gross": taxable_gross.to_string(),
            "region": region.as_str(),
            "base_personal_allowance": table.personal_allowance.to_string()
        }),
        output: serde_json::json!({
            "personal_allowance": assessment.personal_allowance.to_string(),
            "taxable_income": assessment.taxable_income.to_string(),
            "bands": assessment.band_charges,
            "tax": assessment.tax.to_string()
        }),
        reasoning,
    };

    IncomeTaxResult {
        tax: assessment.tax,
        personal_allowance: assessment.personal_allowance,
        taxable_income: assessment.taxable_income,
        band_charges: assessment.band_charges,
        audit_step,
    }
}
