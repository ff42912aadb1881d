//! Pricing domain module.
//!
//! Tiered chapter-credit pricing: the cumulative price table, the calculator
//! that derives marginal prices from it, and the resulting quotes.
//!
//! # Module Structure
//!
//! - `price_table` - Validated cumulative price table
//! - `calculator` - Available options and quotes
//! - `quote` - PurchaseQuote value object
//! - `errors` - PricingError

mod calculator;
mod errors;
mod price_table;
mod quote;

pub use calculator::CreditCalculator;
pub use errors::PricingError;
pub use price_table::{PriceTable, PriceTableEntry};
pub use quote::PurchaseQuote;
