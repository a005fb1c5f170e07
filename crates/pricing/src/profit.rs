//! Profit computation.
//!
//! With tax `tp`, fee percent `fp` and fee constant `fc`:
//!
//! ```text
//! gross  = p + p * tp / 100
//! fee    = gross * fp / 100 + fc
//! profit = gross - fee
//! ```
//!
//! A zero tax rate yields the fee-only form `p - (p * fp / 100 + fc)`.

use serde::Serialize;

use crate::fee::FeeConfig;

/// Tax added on top of `price`.
pub fn tax_amount(price: f64, tax_percent: f64) -> f64 {
    price * tax_percent / 100.0
}

/// Tax-inclusive price.
pub fn gross_after_tax(price: f64, tax_percent: f64) -> f64 {
    price + tax_amount(price, tax_percent)
}

/// Proportional fee on `base` plus the flat per-transaction fee.
pub fn fee_amount(base: f64, fee_percent: f64, fee_constant: f64) -> f64 {
    base * fee_percent / 100.0 + fee_constant
}

/// Net profit at full precision.
pub fn profit(price: f64, config: &FeeConfig) -> f64 {
    let gross = gross_after_tax(price, config.tax_percent());
    gross - fee_amount(gross, config.fee_percent(), config.fee_constant())
}

/// Whether `price` carries data. Zero and NaN mean "nothing entered yet".
pub fn has_price(price: f64) -> bool {
    price != 0.0 && !price.is_nan()
}

/// Full breakdown for one product price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfitQuote {
    pub price: f64,
    pub tax: f64,
    pub gross: f64,
    pub fee: f64,
    pub profit: f64,
}

/// Compute the breakdown, or `None` when the price carries no data.
pub fn quote(price: f64, config: &FeeConfig) -> Option<ProfitQuote> {
    if !has_price(price) {
        return None;
    }

    let tax = tax_amount(price, config.tax_percent());
    let gross = price + tax;
    let fee = fee_amount(gross, config.fee_percent(), config.fee_constant());

    Some(ProfitQuote {
        price,
        tax,
        gross,
        fee,
        profit: gross - fee,
    })
}
