//! Billing collaborator configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Upper bound for `max_retries`.
pub const MAX_CHECKOUT_RETRIES: u32 = 3;

/// Billing API configuration (credits lookup and checkout)
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// Base URL of the billing API
    pub api_base_url: String,

    /// Service token for the billing API
    pub service_token: SecretString,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra checkout attempts after a retryable failure
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Redirect after payment; `{edition_id}` is substituted
    pub success_url: String,

    /// Redirect after cancelling; `{edition_id}` is substituted
    pub cancel_url: String,
}

impl BillingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Longest a checkout request can spend waiting on billing: the credits
    /// read plus every checkout attempt, each bounded by `timeout`.
    pub fn checkout_budget(&self) -> Duration {
        let calls = u64::from(self.max_retries) + 2;
        Duration::from_secs(self.timeout_secs.saturating_mul(calls))
    }

    /// Validate billing configuration
    ///
    /// In production, requires HTTPS for the API base URL.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.api_base_url.is_empty() {
            return Err(ValidationError::MissingRequired("BILLING__API_BASE_URL"));
        }
        if self.service_token.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("BILLING__SERVICE_TOKEN"));
        }
        if !is_http_url(&self.api_base_url) {
            return Err(ValidationError::InvalidBillingUrl);
        }
        if *environment == Environment::Production && !self.api_base_url.starts_with("https://") {
            return Err(ValidationError::BillingUrlMustBeHttps);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidBillingTimeout);
        }
        if self.max_retries > MAX_CHECKOUT_RETRIES {
            return Err(ValidationError::TooManyRetries(MAX_CHECKOUT_RETRIES));
        }
        if !is_http_url(&self.success_url) {
            return Err(ValidationError::InvalidRedirectUrl("BILLING__SUCCESS_URL"));
        }
        if !is_http_url(&self.cancel_url) {
            return Err(ValidationError::InvalidRedirectUrl("BILLING__CANCEL_URL"));
        }
        Ok(())
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            service_token: SecretString::new(String::new()),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            success_url: String::new(),
            cancel_url: String::new(),
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    1
}
