//! Shared HTTP client for the billing collaborator.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

/// Connection settings for the billing API.
#[derive(Clone)]
pub struct BillingClientConfig {
    /// Base URL without trailing slash (e.g. `https://billing.internal`).
    pub api_base_url: String,

    /// Service token sent as a bearer credential.
    pub service_token: SecretString,

    /// Per-request timeout applied by the HTTP client.
    pub timeout: Duration,
}

impl std::fmt::Debug for BillingClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BillingClientConfig")
            .field("api_base_url", &self.api_base_url)
            .field("service_token", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Thin wrapper over `reqwest::Client` that knows the base URL and credentials.
#[derive(Debug, Clone)]
pub struct BillingClient {
    http: reqwest::Client,
    config: BillingClientConfig,
}

impl BillingClient {
    pub fn new(config: BillingClientConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    /// Absolute URL for an API path starting with `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url.trim_end_matches('/'), path)
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .get(self.url(path))
            .bearer_auth(self.config.service_token.expose_secret())
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .post(self.url(path))
            .bearer_auth(self.config.service_token.expose_secret())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base: &str) -> BillingClientConfig {
        BillingClientConfig {
            api_base_url: base.to_string(),
            service_token: SecretString::new("svc-token".to_string()),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn url_joins_without_double_slash() {
        let client = BillingClient::new(config("https://billing.example.test/")).unwrap();
        assert_eq!(
            client.url("/v1/editions/12/chapter-credits"),
            "https://billing.example.test/v1/editions/12/chapter-credits"
        );
    }

    #[test]
    fn debug_redacts_service_token() {
        let debug = format!("{:?}", config("https://billing.example.test"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("svc-token"));
    }
}
