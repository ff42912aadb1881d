//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum HS256 secret length accepted in production.
pub const MIN_PRODUCTION_SECRET_BYTES: usize = 32;

/// Authentication configuration (HS256 access tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared signing secret
    pub jwt_secret: SecretString,

    /// Expected `iss` claim
    pub issuer: String,

    /// Expected `aud` claim
    #[serde(default = "default_audience")]
    pub audience: String,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// In production, requires a secret of at least 32 bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret_len = self.jwt_secret.expose_secret().len();
        if secret_len == 0 {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if self.issuer.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ISSUER"));
        }
        if self.audience.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__AUDIENCE"));
        }

        if *environment == Environment::Production && secret_len < MIN_PRODUCTION_SECRET_BYTES {
            return Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_BYTES));
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: SecretString::new(String::new()),
            issuer: String::new(),
            audience: default_audience(),
        }
    }
}

fn default_audience() -> String {
    "chapter-credits".to_string()
}
