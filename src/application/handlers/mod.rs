//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod purchase;

pub use purchase::{
    CheckoutPolicy, GetPurchaseOptionsHandler, GetPurchaseOptionsQuery, GetPurchaseOptionsResult,
    PurchaseError, QuoteChaptersHandler, QuoteChaptersQuery, StartChapterCheckoutCommand,
    StartChapterCheckoutHandler, StartChapterCheckoutResult,
};
