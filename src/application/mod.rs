//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Queries price what a user may buy; the single command hands a confirmed
//! purchase to the payment collaborator.

pub mod handlers;

pub use handlers::{
    CheckoutPolicy, GetPurchaseOptionsHandler, GetPurchaseOptionsQuery, GetPurchaseOptionsResult,
    PurchaseError, QuoteChaptersHandler, QuoteChaptersQuery, StartChapterCheckoutCommand,
    StartChapterCheckoutHandler, StartChapterCheckoutResult,
};
