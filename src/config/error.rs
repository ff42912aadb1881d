//! Configuration error types

use thiserror::Error;

use crate::domain::pricing::PricingError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Invalid price table: {0}")]
    Pricing(#[from] PricingError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error(
        "Request timeout ({configured_secs}s) must exceed the worst-case checkout time ({required_secs}s)"
    )]
    RequestTimeoutTooShort {
        configured_secs: u64,
        required_secs: u64,
    },

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("JWT secret must be at least {0} bytes in production")]
    JwtSecretTooShort(usize),

    #[error("Billing API URL must use HTTPS in production")]
    BillingUrlMustBeHttps,

    #[error("Invalid billing API URL format")]
    InvalidBillingUrl,

    #[error("Billing timeout must be between 1 and 60 seconds")]
    InvalidBillingTimeout,

    #[error("Billing retries must not exceed {0}")]
    TooManyRetries(u32),

    #[error("Invalid redirect URL for {0}")]
    InvalidRedirectUrl(&'static str),

    #[error("Currency must be a three-letter lowercase ISO 4217 code")]
    InvalidCurrency,
}
