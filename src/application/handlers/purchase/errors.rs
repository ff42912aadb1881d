//! Errors surfaced by the chapter purchase handlers.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::pricing::PricingError;
use crate::ports::{CreditsError, PaymentError, PaymentErrorCode};

/// Failure of a purchase query or command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Could not read purchased chapters: {0}")]
    Credits(#[from] CreditsError),

    #[error("Checkout failed: {0}")]
    Payment(#[from] PaymentError),
}

impl PurchaseError {
    /// Error code for API responses.
    pub fn code(&self) -> ErrorCode {
        match self {
            PurchaseError::Pricing(err) => err.code(),
            PurchaseError::Credits(CreditsError::EditionNotFound(_)) => ErrorCode::EditionNotFound,
            PurchaseError::Credits(_) => ErrorCode::CreditsUnavailable,
            PurchaseError::Payment(err) if err.code == PaymentErrorCode::Timeout => {
                ErrorCode::UpstreamTimeout
            }
            PurchaseError::Payment(_) => ErrorCode::PaymentFailed,
        }
    }

    /// Whether the caller may try the same request again.
    pub fn is_retryable(&self) -> bool {
        match self {
            PurchaseError::Pricing(_) => false,
            PurchaseError::Credits(err) => err.is_retryable(),
            PurchaseError::Payment(err) => err.retryable,
        }
    }
}

impl From<PurchaseError> for DomainError {
    fn from(err: PurchaseError) -> Self {
        match err {
            PurchaseError::Pricing(e) => e.into(),
            PurchaseError::Credits(e) => e.into(),
            PurchaseError::Payment(e) => e.into(),
        }
    }
}
