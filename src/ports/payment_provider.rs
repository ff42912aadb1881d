//! Checkout provider port for external payment processing.
//!
//! The payment collaborator receives one request per confirmed chapter
//! purchase and answers with a hosted checkout page to redirect the buyer to.
//!
//! # Design
//!
//! - **Gateway agnostic**: the wire format belongs to the adapter
//! - **Single call**: no reconciliation happens here; fulfilment is the
//!   collaborator's concern
//! - **Idempotent**: every request carries a key reused across retries

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, EditionId, ErrorCode, IdempotencyKey, Money, UserId};

/// Port for creating chapter checkout sessions.
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Create a checkout session for a chapter purchase.
    ///
    /// Returns a URL for the buyer to complete payment.
    async fn create_checkout(
        &self,
        request: ChapterCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;
}

/// Request to create a chapter checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterCheckoutRequest {
    /// Buyer.
    pub user_id: UserId,

    /// Edition the chapters are bought into.
    pub edition_id: EditionId,

    /// Number of additional chapters.
    pub chapter_count: u32,

    /// Amount to charge, in minor currency units.
    pub amount: Money,

    /// ISO 4217 currency code, lowercase.
    pub currency: String,

    /// Key the provider uses to deduplicate retried requests.
    pub idempotency_key: IdempotencyKey,

    /// URL to redirect after successful checkout.
    pub success_url: String,

    /// URL to redirect after canceled checkout.
    pub cancel_url: String,
}

/// Checkout session for payment completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session ID.
    pub id: String,

    /// URL for the buyer to complete checkout.
    pub url: String,

    /// When the session expires (Unix timestamp), if the provider says.
    pub expires_at: Option<i64>,
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Whether the operation can be retried.
    pub retryable: bool,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            retryable: code.is_retryable(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Create a timeout error.
    pub fn timeout(after: Duration) -> Self {
        Self::new(
            PaymentErrorCode::Timeout,
            format!("Checkout request timed out after {}ms", after.as_millis()),
        )
    }

    /// Create a provider-side error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }

    /// Create an error for a response without a redirect URL.
    pub fn missing_redirect() -> Self {
        Self::new(
            PaymentErrorCode::MissingRedirect,
            "Payment provider returned no redirect URL",
        )
    }

    /// Create an error for a request the provider refused.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::Rejected, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

impl From<PaymentError> for DomainError {
    fn from(err: PaymentError) -> Self {
        let code = match err.code {
            PaymentErrorCode::Timeout => ErrorCode::UpstreamTimeout,
            _ => ErrorCode::PaymentFailed,
        };

        DomainError::new(code, err.message).with_detail("retryable", err.retryable.to_string())
    }
}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// No response within the configured timeout.
    Timeout,

    /// Rate limit exceeded.
    RateLimitExceeded,

    /// Provider API error.
    ProviderError,

    /// Provider answered but without a redirect URL.
    MissingRedirect,

    /// Provider refused the request (validation, auth).
    Rejected,
}

impl PaymentErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PaymentErrorCode::NetworkError
                | PaymentErrorCode::Timeout
                | PaymentErrorCode::RateLimitExceeded
        )
    }
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::Timeout => "timeout",
            PaymentErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            PaymentErrorCode::ProviderError => "provider_error",
            PaymentErrorCode::MissingRedirect => "missing_redirect",
            PaymentErrorCode::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn CheckoutProvider) {}
    }

    #[test]
    fn payment_error_retryable() {
        assert!(PaymentErrorCode::NetworkError.is_retryable());
        assert!(PaymentErrorCode::Timeout.is_retryable());
        assert!(PaymentErrorCode::RateLimitExceeded.is_retryable());

        assert!(!PaymentErrorCode::ProviderError.is_retryable());
        assert!(!PaymentErrorCode::MissingRedirect.is_retryable());
        assert!(!PaymentErrorCode::Rejected.is_retryable());
    }

    #[test]
    fn payment_error_display() {
        let err = PaymentError::missing_redirect();
        assert!(err.to_string().contains("missing_redirect"));
        assert!(err.to_string().contains("no redirect URL"));
    }

    #[test]
    fn timeout_converts_to_upstream_timeout() {
        let err: DomainError = PaymentError::timeout(Duration::from_secs(10)).into();
        assert_eq!(err.code, ErrorCode::UpstreamTimeout);
        assert_eq!(err.details.get("retryable"), Some(&"true".to_string()));
    }

    #[test]
    fn provider_error_converts_to_payment_failed() {
        let err: DomainError = PaymentError::provider("500").into();
        assert_eq!(err.code, ErrorCode::PaymentFailed);
        assert_eq!(err.details.get("retryable"), Some(&"false".to_string()));
    }
}
