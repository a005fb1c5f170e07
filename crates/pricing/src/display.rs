//! Display formatting.
//!
//! Values are rounded to two decimals only when rendered; the model keeps
//! full precision. Rounding works on the exact binary value of the `f64`, so
//! `104.605` (stored as 104.60500000000000397...) renders as `104.61`. Exact
//! binary ties round half to even.

use core::fmt;

use crate::fee::FeeConfig;
use crate::profit::quote;

/// Placeholder shown when a product has no usable price.
pub const PLACEHOLDER: &str = "---";

pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

pub fn format_fee_constant(value: f64) -> String {
    format!("{value:.2}")
}

/// What the profit column shows for one product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfitDisplay {
    Amount(f64),
    Placeholder,
}

impl ProfitDisplay {
    pub fn for_price(price: f64, config: &FeeConfig) -> Self {
        match quote(price, config) {
            Some(q) => Self::Amount(q.profit),
            None => Self::Placeholder,
        }
    }

    pub fn amount(&self) -> Option<f64> {
        match self {
            Self::Amount(v) => Some(*v),
            Self::Placeholder => None,
        }
    }
}

impl fmt::Display for ProfitDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(v) => write!(f, "{v:.2}"),
            Self::Placeholder => f.write_str(PLACEHOLDER),
        }
    }
}
