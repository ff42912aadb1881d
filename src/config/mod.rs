//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CHAPTER_CREDITS_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use chapter_credits::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.bind_addr().unwrap());
//! ```

mod auth;
mod billing;
mod error;
mod pricing;
mod server;

pub use auth::{AuthConfig, MIN_PRODUCTION_SECRET_BYTES};
pub use billing::{BillingConfig, MAX_CHECKOUT_RETRIES};
pub use error::{ConfigError, ValidationError};
pub use pricing::PricingConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Access token validation
    pub auth: AuthConfig,

    /// Billing collaborator (credits lookup and checkout)
    pub billing: BillingConfig,

    /// Price table and currency
    #[serde(default)]
    pub pricing: PricingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CHAPTER_CREDITS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CHAPTER_CREDITS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CHAPTER_CREDITS__PRICING__PRICE_TABLE=1:25,2:35` -> `pricing.price_table`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CHAPTER_CREDITS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Also builds the price table, so a malformed or decreasing table fails
    /// here rather than on the first quote, and checks that the request
    /// timeout leaves room for every checkout retry.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.billing.validate(&self.server.environment)?;
        self.server.ensure_request_budget(self.billing.checkout_budget())?;
        self.pricing.validate()?;
        self.pricing.price_table()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "CHAPTER_CREDITS__AUTH__JWT_SECRET",
        "CHAPTER_CREDITS__AUTH__ISSUER",
        "CHAPTER_CREDITS__BILLING__API_BASE_URL",
        "CHAPTER_CREDITS__BILLING__SERVICE_TOKEN",
        "CHAPTER_CREDITS__BILLING__SUCCESS_URL",
        "CHAPTER_CREDITS__BILLING__CANCEL_URL",
        "CHAPTER_CREDITS__BILLING__MAX_RETRIES",
        "CHAPTER_CREDITS__BILLING__TIMEOUT_SECS",
        "CHAPTER_CREDITS__SERVER__REQUEST_TIMEOUT_SECS",
        "CHAPTER_CREDITS__SERVER__PORT",
        "CHAPTER_CREDITS__SERVER__ENVIRONMENT",
        "CHAPTER_CREDITS__PRICING__PRICE_TABLE",
        "CHAPTER_CREDITS__PRICING__CURRENCY",
    ];

    fn set_minimal_env() {
        env::set_var("CHAPTER_CREDITS__AUTH__JWT_SECRET", "0123456789abcdef0123456789abcdef");
        env::set_var("CHAPTER_CREDITS__AUTH__ISSUER", "https://id.example.com");
        env::set_var("CHAPTER_CREDITS__BILLING__API_BASE_URL", "https://billing.example.com");
        env::set_var("CHAPTER_CREDITS__BILLING__SERVICE_TOKEN", "svc_xxx");
        env::set_var(
            "CHAPTER_CREDITS__BILLING__SUCCESS_URL",
            "https://app.example.com/editions/{edition_id}?purchase=done",
        );
        env::set_var(
            "CHAPTER_CREDITS__BILLING__CANCEL_URL",
            "https://app.example.com/editions/{edition_id}",
        );
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        set_minimal_env();
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_environment() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.billing.api_base_url, "https://billing.example.com");
        assert_eq!(config.auth.issuer, "https://id.example.com");
        assert_eq!(config.pricing.currency, "eur");
        assert!(config.pricing.price_table.is_none());
    }

    #[test]
    fn test_validate_full_config() {
        let config = load_with(&[]).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_is_production() {
        let config = load_with(&[("CHAPTER_CREDITS__SERVER__ENVIRONMENT", "production")]).unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_values() {
        let config = load_with(&[
            ("CHAPTER_CREDITS__SERVER__PORT", "3000"),
            ("CHAPTER_CREDITS__BILLING__MAX_RETRIES", "2"),
            ("CHAPTER_CREDITS__PRICING__CURRENCY", "usd"),
        ])
        .unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.billing.max_retries, 2);
        assert_eq!(config.pricing.currency, "usd");
    }

    #[test]
    fn test_price_table_override() {
        let config = load_with(&[("CHAPTER_CREDITS__PRICING__PRICE_TABLE", "1:20,2:30")]).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.pricing.price_table().unwrap().max_chapters(), 2);
    }

    #[test]
    fn test_bad_price_table_fails_validation() {
        let config = load_with(&[("CHAPTER_CREDITS__PRICING__PRICE_TABLE", "1:20,3:30")]).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Pricing(_))));
    }

    #[test]
    fn test_missing_billing_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("CHAPTER_CREDITS__AUTH__JWT_SECRET", "secret");
        env::set_var("CHAPTER_CREDITS__AUTH__ISSUER", "https://id.example.com");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_request_timeout_must_cover_checkout_retries() {
        let config = load_with(&[
            ("CHAPTER_CREDITS__BILLING__TIMEOUT_SECS", "60"),
            ("CHAPTER_CREDITS__BILLING__MAX_RETRIES", "3"),
        ])
        .unwrap();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed(
                ValidationError::RequestTimeoutTooShort {
                    configured_secs: 45,
                    required_secs: 300,
                }
            ))
        ));
    }

    #[test]
    fn test_request_timeout_equal_to_checkout_budget_is_rejected() {
        // 10s per call: credits read + two checkout attempts = 30s
        let config =
            load_with(&[("CHAPTER_CREDITS__SERVER__REQUEST_TIMEOUT_SECS", "30")]).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed(
                ValidationError::RequestTimeoutTooShort { .. }
            ))
        ));
    }

    #[test]
    fn test_default_timeouts_leave_room_for_retry() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.billing.checkout_budget().as_secs(), 30);
        assert!(config.server.request_timeout() > config.billing.checkout_budget());
    }
}
