//! Per-strategy configuration.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::matcher::MatchParams;
use crate::domain::{Balance, MarketId, ProfitModel, StrategyId, VenueId, Volume};

/// One side of a strategy: which venue, which market.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LegConfig {
    pub venue: VenueId,
    pub market: MarketId,
}

/// Tunable strategy parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StrategyParams {
    /// No orders are sent while either balance is below this floor.
    #[serde(default = "default_min_balance_floor")]
    pub min_balance_floor: Balance,

    /// Smallest crossing size worth executing.
    #[serde(default = "default_min_tradable_size")]
    pub min_tradable_size: Volume,

    /// Detect and log crossings without sending orders.
    #[serde(default)]
    pub dry_run: bool,
}

fn default_min_balance_floor() -> Balance {
    Decimal::ONE
}

fn default_min_tradable_size() -> Volume {
    Decimal::ONE
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            min_balance_floor: default_min_balance_floor(),
            min_tradable_size: default_min_tradable_size(),
            dry_run: false,
        }
    }
}

/// Strategy definition, loaded once at startup and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StrategyConfig {
    pub id: StrategyId,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Cycle period in milliseconds.
    #[serde(default = "default_period_ms")]
    pub period_ms: u64,

    pub source: LegConfig,
    pub target: LegConfig,

    /// How crossing profit is computed. Required: the relation between the
    /// two markets cannot be inferred from prices.
    pub profit_model: ProfitModel,

    #[serde(default)]
    pub params: StrategyParams,
}

fn default_enabled() -> bool {
    true
}

fn default_period_ms() -> u64 {
    5_000
}

impl StrategyConfig {
    #[must_use]
    pub const fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }

    #[must_use]
    pub fn match_params(&self) -> MatchParams {
        MatchParams {
            min_tradable_size: self.params.min_tradable_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn fills_defaults_for_optional_fields() {
        let config: StrategyConfig = toml::from_str(
            r#"
id = "arb-fed-cut"
profit_model = "mirrored"
source = { venue = "polymarket", market = "fed-decreases-rates-50bps" }
target = { venue = "drift", market = "FED-CUT-50-SEPT-2024-BET" }
"#,
        )
        .unwrap();

        assert!(config.enabled);
        assert_eq!(config.period(), Duration::from_secs(5));
        assert_eq!(config.params, StrategyParams::default());
        assert_eq!(config.match_params().min_tradable_size, dec!(1));
    }

    #[test]
    fn profit_model_is_required() {
        let result: Result<StrategyConfig, _> = toml::from_str(
            r#"
id = "arb"
source = { venue = "a", market = "x" }
target = { venue = "b", market = "y" }
"#,
        );

        assert!(result.is_err());
    }
}
