//! Pricing model.
//!
//! Pure, stateless arithmetic: given a product price and a fee/tax
//! configuration, compute the tax amount, the transaction fee and the net
//! profit. No IO, no storage, no rounding of internal values (rounding is a
//! display concern, see [`display`]).

pub mod display;
pub mod fee;
pub mod profit;

pub use display::{ProfitDisplay, format_amount, format_fee_constant, format_percent};
pub use fee::FeeConfig;
pub use profit::{ProfitQuote, fee_amount, gross_after_tax, has_price, profit, quote, tax_amount};
