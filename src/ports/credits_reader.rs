//! Credits reader port.
//!
//! The publishing backend owns purchase history. This port asks it how many
//! chapters a user has already bought in an edition.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, EditionId, ErrorCode, UserId};

/// Reads a user's chapter purchase count for an edition.
#[async_trait]
pub trait CreditsReader: Send + Sync {
    /// Number of chapters `user_id` has already purchased in `edition_id`.
    ///
    /// A user with no purchases yields `Ok(0)`, not an error.
    async fn chapters_purchased(
        &self,
        user_id: &UserId,
        edition_id: &EditionId,
    ) -> Result<u32, CreditsError>;
}

/// Errors from the credits collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreditsError {
    /// The edition does not exist upstream.
    #[error("Edition not found: {0}")]
    EditionNotFound(String),

    /// Upstream could not be reached or timed out.
    #[error("Credits service unavailable: {0}")]
    Unavailable(String),

    /// Upstream answered with a payload that does not match the schema.
    #[error("Malformed credits response: {0}")]
    MalformedResponse(String),
}

impl CreditsError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        CreditsError::Unavailable(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        CreditsError::MalformedResponse(message.into())
    }

    /// Whether the same call may succeed if repeated.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CreditsError::Unavailable(_))
    }
}

impl From<CreditsError> for DomainError {
    fn from(err: CreditsError) -> Self {
        let code = match err {
            CreditsError::EditionNotFound(_) => ErrorCode::EditionNotFound,
            _ => ErrorCode::CreditsUnavailable,
        };
        DomainError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credits_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn CreditsReader) {}
    }

    #[test]
    fn only_unavailability_is_retryable() {
        assert!(CreditsError::unavailable("timeout").is_retryable());
        assert!(!CreditsError::malformed("missing field").is_retryable());
        assert!(!CreditsError::EditionNotFound("9".to_string()).is_retryable());
    }

    #[test]
    fn converts_to_domain_error() {
        let err: DomainError = CreditsError::unavailable("connection refused").into();
        assert_eq!(err.code, ErrorCode::CreditsUnavailable);
        assert!(err.message.contains("connection refused"));
    }
}
