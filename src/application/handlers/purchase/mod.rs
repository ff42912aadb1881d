//! Chapter purchase handlers.
//!
//! ## Queries
//! - Purchase options with quotes for an edition
//! - Quote for a single quantity
//!
//! ## Commands
//! - Start checkout for additional chapters

mod errors;
mod get_purchase_options;
mod quote_chapters;
mod start_chapter_checkout;

pub use errors::PurchaseError;

// Commands
pub use start_chapter_checkout::{
    CheckoutPolicy, StartChapterCheckoutCommand, StartChapterCheckoutHandler,
    StartChapterCheckoutResult,
};

// Queries
pub use get_purchase_options::{
    GetPurchaseOptionsHandler, GetPurchaseOptionsQuery, GetPurchaseOptionsResult,
};
pub use quote_chapters::{QuoteChaptersHandler, QuoteChaptersQuery};
