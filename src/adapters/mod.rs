//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Access token validation (JWT, mock)
//! - `billing` - Credits lookup and checkout over HTTP (plus mocks)
//! - `http` - Axum REST API

pub mod auth;
pub mod billing;
pub mod http;

pub use auth::{JwtSessionValidator, JwtValidatorConfig, MockSessionValidator};
pub use billing::{
    BillingClient, BillingClientConfig, HttpCheckoutProvider, HttpCreditsReader,
    MockCheckoutProvider, MockCreditsReader,
};
