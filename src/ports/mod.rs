//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CreditsReader` - chapters already purchased, from the publishing backend
//! - `CheckoutProvider` - hosted checkout sessions from the payment collaborator
//! - `SessionValidator` - bearer token validation

mod credits_reader;
mod payment_provider;
mod session_validator;

pub use credits_reader::{CreditsError, CreditsReader};
pub use payment_provider::{
    ChapterCheckoutRequest, CheckoutProvider, CheckoutSession, PaymentError, PaymentErrorCode,
};
pub use session_validator::SessionValidator;
