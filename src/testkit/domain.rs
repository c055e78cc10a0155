//! Builders for domain primitives used across tests.
//!
//! Concise factory functions so tests focus on assertions rather than
//! construction boilerplate.

use rust_decimal::Decimal;

use crate::domain::{Book, MarketId, PriceLevel, VenueId};

/// Create a [`MarketId`] from a string.
pub fn market(id: &str) -> MarketId {
    MarketId::new(id)
}

/// Create a [`VenueId`] from a string.
pub fn venue(id: &str) -> VenueId {
    VenueId::new(id)
}

/// Build an unchecked book from `(price, size)` pairs.
pub fn book(market_id: &str, bids: &[(Decimal, Decimal)], asks: &[(Decimal, Decimal)]) -> Book {
    Book::with_levels(
        MarketId::new(market_id),
        levels(bids),
        levels(asks),
    )
}

fn levels(pairs: &[(Decimal, Decimal)]) -> Vec<PriceLevel> {
    pairs
        .iter()
        .map(|&(price, size)| PriceLevel::new(price, size))
        .collect()
}
