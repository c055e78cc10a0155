//! Canonical test configurations.
//!
//! Single source of truth for strategy configs used across tests.

use rust_decimal::Decimal;

use crate::application::strategy::{LegConfig, StrategyConfig, StrategyParams};
use crate::domain::{MarketId, ProfitModel, StrategyId, VenueId};

/// Enabled mirrored strategy trading `source-market` on `source` against
/// `target-market` on `target`, with a one-unit floor and tradable size.
pub fn strategy() -> StrategyConfig {
    StrategyConfig {
        id: StrategyId::new("test-strategy"),
        enabled: true,
        period_ms: 1_000,
        source: LegConfig {
            venue: VenueId::new("source"),
            market: MarketId::new("source-market"),
        },
        target: LegConfig {
            venue: VenueId::new("target"),
            market: MarketId::new("target-market"),
        },
        profit_model: ProfitModel::Mirrored,
        params: StrategyParams {
            min_balance_floor: Decimal::ONE,
            min_tradable_size: Decimal::ONE,
            dry_run: false,
        },
    }
}
