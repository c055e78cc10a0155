//! Paper venue configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{Balance, Book, DomainError, MarketId, PriceLevel};

/// A market listed on a paper venue with its starting ladder.
#[derive(Debug, Clone, Deserialize)]
pub struct PaperMarketConfig {
    pub id: MarketId,
    /// `[price, size]` pairs, best bid first.
    #[serde(default)]
    pub bids: Vec<PriceLevel>,
    /// `[price, size]` pairs, best ask first.
    #[serde(default)]
    pub asks: Vec<PriceLevel>,
}

impl PaperMarketConfig {
    /// Build the starting book, enforcing the ladder invariants.
    ///
    /// # Errors
    ///
    /// Returns the first ordering or positivity violation.
    pub fn book(&self) -> Result<Book, DomainError> {
        Book::try_with_levels(self.id.clone(), self.bids.clone(), self.asks.clone())
    }
}

/// Settings for an in-memory simulated venue.
#[derive(Debug, Clone, Deserialize)]
pub struct PaperVenueConfig {
    /// Starting settlement-unit balance.
    #[serde(default = "default_balance")]
    pub balance: Balance,

    /// Markets this venue lists. Registering anything else fails.
    #[serde(default)]
    pub markets: Vec<PaperMarketConfig>,
}

fn default_balance() -> Balance {
    Decimal::ONE_THOUSAND
}

impl Default for PaperVenueConfig {
    fn default() -> Self {
        Self {
            balance: default_balance(),
            markets: Vec::new(),
        }
    }
}
