//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates venues, strategies and
//! logging. Configuration is loaded once at startup from a TOML file and is
//! immutable afterwards.
//!
//! # Example
//!
//! ```no_run
//! use crossarb::infrastructure::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::logging::LoggingConfig;
use super::venue::{VenueConfig, VenueSettings};
use crate::application::strategy::StrategyConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Force every strategy into dry-run mode.
    #[serde(default)]
    pub dry_run: bool,

    /// Venues available to strategies.
    #[serde(default)]
    pub venues: Vec<VenueConfig>,

    /// Strategy definitions.
    #[serde(default)]
    pub strategies: Vec<StrategyConfig>,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        let mut venue_ids = HashSet::new();
        for venue in &self.venues {
            if venue.id.as_str().is_empty() {
                return Err(ConfigError::MissingField { field: "venues.id" }.into());
            }
            if !venue_ids.insert(venue.id.as_str()) {
                return Err(ConfigError::DuplicateId {
                    kind: "venue",
                    id: venue.id.to_string(),
                }
                .into());
            }
            match &venue.settings {
                VenueSettings::Paper(paper) => {
                    if paper.balance < Decimal::ZERO {
                        return Err(ConfigError::InvalidValue {
                            field: "venues.balance",
                            reason: format!("venue '{}' must not start negative", venue.id),
                        }
                        .into());
                    }
                    for market in &paper.markets {
                        market.book().map_err(|e| ConfigError::InvalidValue {
                            field: "venues.markets",
                            reason: format!("market '{}' on venue '{}': {e}", market.id, venue.id),
                        })?;
                    }
                }
            }
        }

        let mut strategy_ids = HashSet::new();
        for strategy in &self.strategies {
            if strategy.id.as_str().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "strategies.id",
                }
                .into());
            }
            if !strategy_ids.insert(strategy.id.as_str()) {
                return Err(ConfigError::DuplicateId {
                    kind: "strategy",
                    id: strategy.id.to_string(),
                }
                .into());
            }
            if strategy.period_ms == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "period_ms",
                    reason: "must be greater than 0".to_string(),
                }
                .into());
            }
            if strategy.params.min_balance_floor < Decimal::ZERO {
                return Err(ConfigError::InvalidValue {
                    field: "min_balance_floor",
                    reason: "must be 0 or greater".to_string(),
                }
                .into());
            }
            if strategy.params.min_tradable_size <= Decimal::ZERO {
                return Err(ConfigError::InvalidValue {
                    field: "min_tradable_size",
                    reason: "must be greater than 0".to_string(),
                }
                .into());
            }
            for leg in [&strategy.source, &strategy.target] {
                if !venue_ids.contains(leg.venue.as_str()) {
                    return Err(ConfigError::UnknownVenue {
                        strategy: strategy.id.to_string(),
                        venue: leg.venue.to_string(),
                    }
                    .into());
                }
                if leg.market.as_str().is_empty() {
                    return Err(ConfigError::MissingField {
                        field: "strategies.market",
                    }
                    .into());
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const VALID: &str = r#"
dry_run = true

[logging]
level = "debug"
format = "json"

[[venues]]
id = "alpha"
kind = "paper"
balance = "500"

[[venues.markets]]
id = "fed-cut"
bids = [["0.60", "5"]]
asks = [["0.62", "5"]]

[[venues]]
id = "beta"
kind = "paper"

[[strategies]]
id = "fed"
period_ms = 250
profit_model = "mirrored"
source = { venue = "alpha", market = "fed-cut" }
target = { venue = "beta", market = "FED-CUT" }
"#;

    #[test]
    fn parses_full_config() {
        let config = Config::parse_toml(VALID).unwrap();

        assert!(config.dry_run);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.venues.len(), 2);
        assert_eq!(config.strategies[0].period_ms, 250);
        let VenueSettings::Paper(paper) = &config.venues[0].settings;
        assert_eq!(paper.balance, Decimal::from(500));
        assert_eq!(paper.markets[0].bids.len(), 1);
    }

    #[test]
    fn empty_config_is_valid() {
        let config = Config::parse_toml("").unwrap();
        assert!(config.strategies.is_empty());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn rejects_unknown_venue_reference() {
        let content = VALID.replace("venue = \"beta\"", "venue = \"gamma\"");
        let err = Config::parse_toml(&content).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::UnknownVenue { ref venue, .. }) if venue == "gamma"
        ));
    }

    #[test]
    fn rejects_duplicate_venue() {
        let content = VALID.replace("id = \"beta\"", "id = \"alpha\"");
        let err = Config::parse_toml(&content).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::DuplicateId { kind: "venue", .. })));
    }

    #[test]
    fn rejects_zero_period() {
        let content = VALID.replace("period_ms = 250", "period_ms = 0");
        let err = Config::parse_toml(&content).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "period_ms", .. })
        ));
    }

    #[test]
    fn rejects_misordered_ladder() {
        let content = VALID.replace(r#"bids = [["0.60", "5"]]"#, r#"bids = [["0.50", "5"], ["0.60", "5"]]"#);
        let err = Config::parse_toml(&content).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "venues.markets", .. })
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = Config::parse_toml("strategies = 3").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }
}
