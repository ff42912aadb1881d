//! HTTP listener settings and the request time budget.

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

/// Longest request timeout accepted, in seconds.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Where the API listens and how long a single request may run.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Selects JSON logs and the stricter secret/URL checks.
    #[serde(default)]
    pub environment: Environment,

    /// `EnvFilter` directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Upper bound for a whole request, checkout retries included.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Comma-separated browser origins allowed by CORS.
    pub cors_origins: Option<String>,
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, ValidationError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ValidationError::InvalidBindAddress(addr))
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Configured CORS origins, blanks dropped.
    pub fn allowed_origins(&self) -> Vec<String> {
        let Some(raw) = self.cors_origins.as_deref() else {
            return Vec::new();
        };
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    /// Fails unless a request can outlive `required`.
    ///
    /// The request timeout layer drops the handler when it fires, so anything
    /// the handler still has in flight (a checkout retry, say) is lost.
    pub fn ensure_request_budget(&self, required: Duration) -> Result<(), ValidationError> {
        if self.request_timeout() <= required {
            return Err(ValidationError::RequestTimeoutTooShort {
                configured_secs: self.request_timeout_secs,
                required_secs: required.as_secs(),
            });
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        self.bind_addr().map(|_| ())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout_secs(),
            cors_origins: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info,chapter_credits=debug,tower_http=info".to_string()
}

fn default_request_timeout_secs() -> u64 {
    45
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_all_interfaces() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.request_timeout(), Duration::from_secs(45));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unparseable_host_is_rejected() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidBindAddress(_))
        ));
    }

    #[test]
    fn port_zero_is_rejected() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidPort)));
    }

    #[test]
    fn request_timeout_must_be_within_bounds() {
        for secs in [0, MAX_REQUEST_TIMEOUT_SECS + 1] {
            let config = ServerConfig {
                request_timeout_secs: secs,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ValidationError::InvalidTimeout)));
        }
    }

    #[test]
    fn allowed_origins_skip_blanks() {
        let config = ServerConfig {
            cors_origins: Some("http://localhost:5173, ,http://localhost:3000,".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.allowed_origins(),
            vec!["http://localhost:5173", "http://localhost:3000"]
        );
        assert!(ServerConfig::default().allowed_origins().is_empty());
    }

    #[test]
    fn request_budget_must_exceed_requirement() {
        let config = ServerConfig {
            request_timeout_secs: 30,
            ..Default::default()
        };

        assert!(config.ensure_request_budget(Duration::from_secs(29)).is_ok());
        assert!(matches!(
            config.ensure_request_budget(Duration::from_secs(30)),
            Err(ValidationError::RequestTimeoutTooShort {
                configured_secs: 30,
                required_secs: 30,
            })
        ));
    }

    #[test]
    fn staging_is_not_an_environment() {
        let parsed: Result<Environment, _> = serde_json::from_str("\"staging\"");
        assert!(parsed.is_err());
        let parsed: Environment = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(parsed, Environment::Production);
    }
}
