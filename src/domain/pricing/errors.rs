//! Pricing-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Configuration | 500 |
//! | OutOfRange | 422 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised by the price table and the credit calculator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// The price table is unusable. Fatal at startup.
    #[error("Price table misconfigured: {reason}")]
    Configuration { reason: String },

    /// The requested quantity does not fit in the remaining chapter allowance.
    #[error(
        "Cannot buy {requested} more chapter(s) with {already_purchased} already purchased (maximum {max_chapters})"
    )]
    OutOfRange {
        already_purchased: u32,
        requested: u32,
        max_chapters: u32,
    },
}

impl PricingError {
    pub fn configuration(reason: impl Into<String>) -> Self {
        PricingError::Configuration {
            reason: reason.into(),
        }
    }

    pub fn out_of_range(already_purchased: u32, requested: u32, max_chapters: u32) -> Self {
        PricingError::OutOfRange {
            already_purchased,
            requested,
            max_chapters,
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            PricingError::Configuration { .. } => ErrorCode::PricingMisconfigured,
            PricingError::OutOfRange { .. } => ErrorCode::OutOfRange,
        }
    }
}

impl From<PricingError> for DomainError {
    fn from(err: PricingError) -> Self {
        let code = err.code();
        let message = err.to_string();
        match err {
            PricingError::Configuration { reason } => {
                DomainError::new(code, message).with_detail("reason", reason)
            }
            PricingError::OutOfRange {
                already_purchased,
                requested,
                max_chapters,
            } => DomainError::new(code, message)
                .with_detail("already_purchased", already_purchased.to_string())
                .with_detail("requested", requested.to_string())
                .with_detail("max_chapters", max_chapters.to_string()),
        }
    }
}
