//! JWT session validator using a shared HS256 secret.
//!
//! Tokens are issued by the publishing platform's identity service and
//! carry the author as `sub`. Signature, issuer, audience and expiry are
//! all checked before a user is returned.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Settings for [`JwtSessionValidator`].
#[derive(Clone)]
pub struct JwtValidatorConfig {
    pub secret: SecretString,
    pub issuer: String,
    pub audience: String,
}

impl std::fmt::Debug for JwtValidatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtValidatorConfig")
            .field("secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

/// Claims read from the access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    pub iss: String,
    pub aud: String,
    pub exp: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Validates HS256 access tokens.
pub struct JwtSessionValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionValidator {
    pub fn new(config: &JwtValidatorConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.expose_secret().as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
                        tracing::warn!(error = %e, "Token issued for another service");
                        AuthError::InvalidToken
                    }
                    _ => {
                        tracing::debug!(error = %e, "Token validation failed");
                        AuthError::InvalidToken
                    }
                }
            },
        )?;

        let claims = data.claims;
        let user_id = UserId::new(claims.sub).map_err(|_| {
            tracing::warn!("Token has a blank subject");
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(user_id, claims.email, claims.name))
    }
}
