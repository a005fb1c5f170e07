use core::ops::RangeInclusive;

use serde::Serialize;

use pricecalc_core::{DomainError, DomainResult, ValueObject};

/// Allowed transaction fee percentage (slider range 0.1 to 5.0).
pub const FEE_PERCENT_RANGE: RangeInclusive<f64> = 0.1..=5.0;
/// Allowed flat per-transaction fee.
pub const FEE_CONSTANT_RANGE: RangeInclusive<f64> = 0.0..=0.5;
/// Allowed tax percentage.
pub const TAX_PERCENT_RANGE: RangeInclusive<f64> = 0.0..=16.0;

pub const DEFAULT_FEE_PERCENT: f64 = 2.6;
pub const DEFAULT_FEE_CONSTANT: f64 = 0.1;
pub const DEFAULT_TAX_PERCENT: f64 = 0.0;

/// Fee and tax configuration applied to every product.
///
/// Ephemeral: it is exported on demand but never persisted alongside the
/// products. Tax defaults to zero, which reduces the computation to the
/// fee-only form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeConfig {
    fee_percent: f64,
    fee_constant: f64,
    tax_percent: f64,
}

impl ValueObject for FeeConfig {}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            fee_percent: DEFAULT_FEE_PERCENT,
            fee_constant: DEFAULT_FEE_CONSTANT,
            tax_percent: DEFAULT_TAX_PERCENT,
        }
    }
}

impl FeeConfig {
    pub fn new(fee_percent: f64, fee_constant: f64, tax_percent: f64) -> DomainResult<Self> {
        Ok(Self {
            fee_percent: check("fee percent", fee_percent, &FEE_PERCENT_RANGE)?,
            fee_constant: check("fee constant", fee_constant, &FEE_CONSTANT_RANGE)?,
            tax_percent: check("tax percent", tax_percent, &TAX_PERCENT_RANGE)?,
        })
    }

    pub fn fee_percent(&self) -> f64 {
        self.fee_percent
    }

    pub fn fee_constant(&self) -> f64 {
        self.fee_constant
    }

    pub fn tax_percent(&self) -> f64 {
        self.tax_percent
    }

    pub fn set_fee_percent(&mut self, value: f64) -> DomainResult<()> {
        self.fee_percent = check("fee percent", value, &FEE_PERCENT_RANGE)?;
        Ok(())
    }

    pub fn set_fee_constant(&mut self, value: f64) -> DomainResult<()> {
        self.fee_constant = check("fee constant", value, &FEE_CONSTANT_RANGE)?;
        Ok(())
    }

    pub fn set_tax_percent(&mut self, value: f64) -> DomainResult<()> {
        self.tax_percent = check("tax percent", value, &TAX_PERCENT_RANGE)?;
        Ok(())
    }
}

fn check(name: &str, value: f64, range: &RangeInclusive<f64>) -> DomainResult<f64> {
    if !value.is_finite() {
        return Err(DomainError::validation(format!("{name} must be a finite number")));
    }
    if !range.contains(&value) {
        return Err(DomainError::validation(format!(
            "{name} {value} outside [{}, {}]",
            range.start(),
            range.end()
        )));
    }
    Ok(value)
}
