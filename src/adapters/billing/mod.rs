//! Billing collaborator adapters.
//!
//! - `HttpCreditsReader` / `HttpCheckoutProvider` talk to the billing API
//!   over HTTP with a bearer service token
//! - `MockCreditsReader` / `MockCheckoutProvider` for tests and local runs

mod client;
mod http_checkout_provider;
mod http_credits_reader;
mod mock_checkout_provider;
mod mock_credits_reader;
mod wire_types;

pub use client::{BillingClient, BillingClientConfig};
pub use http_checkout_provider::HttpCheckoutProvider;
pub use http_credits_reader::HttpCreditsReader;
pub use mock_checkout_provider::MockCheckoutProvider;
pub use mock_credits_reader::MockCreditsReader;
