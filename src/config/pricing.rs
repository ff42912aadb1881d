//! Pricing configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::pricing::{PriceTable, PricingError};

/// Pricing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// Cumulative price table override, e.g. `"1:25,2:35,3:49"` (major units).
    /// The built-in table is used when absent.
    pub price_table: Option<String>,

    /// ISO 4217 currency code sent to the payment collaborator
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl PricingConfig {
    /// Build and validate the price table.
    pub fn price_table(&self) -> Result<PriceTable, PricingError> {
        match self.price_table.as_deref().map(str::trim) {
            Some(table) if !table.is_empty() => PriceTable::parse(table),
            _ => Ok(PriceTable::reference()),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let valid =
            self.currency.len() == 3 && self.currency.chars().all(|c| c.is_ascii_lowercase());
        if !valid {
            return Err(ValidationError::InvalidCurrency);
        }
        Ok(())
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            price_table: None,
            currency: default_currency(),
        }
    }
}

fn default_currency() -> String {
    "eur".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Money;

    #[test]
    fn test_defaults_use_reference_table() {
        let config = PricingConfig::default();
        let table = config.price_table().unwrap();
        assert_eq!(table.max_chapters(), 8);
        assert_eq!(config.currency, "eur");
    }

    #[test]
    fn test_blank_override_uses_reference_table() {
        let config = PricingConfig {
            price_table: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.price_table().unwrap().max_chapters(), 8);
    }

    #[test]
    fn test_override_is_parsed() {
        let config = PricingConfig {
            price_table: Some("1:20,2:30,3:39.50".to_string()),
            ..Default::default()
        };
        let table = config.price_table().unwrap();
        assert_eq!(table.max_chapters(), 3);
        assert_eq!(table.cumulative(3), Some(Money::from_minor(3950)));
    }

    #[test]
    fn test_decreasing_override_is_rejected() {
        let config = PricingConfig {
            price_table: Some("1:20,2:15".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.price_table(),
            Err(PricingError::Configuration { .. })
        ));
    }

    #[test]
    fn test_currency_validation() {
        let config = PricingConfig {
            currency: "EUR".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PricingConfig {
            currency: "usd".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
