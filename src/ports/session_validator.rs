//! Session validation port for access token validation.
//!
//! Provider-agnostic: the JWT adapter and the test mock both implement it,
//! and the HTTP middleware only sees this trait.
//!
//! Implementations MUST validate signature, issuer, audience, and expiry.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate an access token (without the `Bearer ` prefix).
    ///
    /// * `Err(AuthError::InvalidToken)` - malformed or bad signature
    /// * `Err(AuthError::TokenExpired)` - signature valid but expired
    /// * `Err(AuthError::ServiceUnavailable)` - validator could not run
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_validator_is_object_safe() {
        fn _accepts_dyn(_validator: &dyn SessionValidator) {}
    }
}
