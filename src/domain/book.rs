//! Order book snapshot types.
//!
//! This module provides types for representing a venue's order book at one
//! point in time:
//!
//! - [`PriceLevel`] - A single price level with size
//! - [`Book`] - Immutable bid/ask ladder for a single market
//!
//! # Order Book Structure
//!
//! An order book has two sides:
//! - **Bids**: Buy orders, strictly descending by price (best bid first)
//! - **Asks**: Sell orders, strictly ascending by price (best ask first)
//!
//! A [`Book`] is built fresh on every fetch and exposes no mutating API.
//!
//! # Examples
//!
//! ```
//! use crossarb::domain::book::{Book, PriceLevel};
//! use crossarb::domain::id::MarketId;
//! use rust_decimal_macros::dec;
//!
//! let book = Book::try_with_levels(
//!     MarketId::new("fed-cut-50"),
//!     vec![PriceLevel::new(dec!(0.45), dec!(100)), PriceLevel::new(dec!(0.44), dec!(200))],
//!     vec![PriceLevel::new(dec!(0.46), dec!(150)), PriceLevel::new(dec!(0.47), dec!(300))],
//! )
//! .unwrap();
//!
//! assert_eq!(book.best_bid().unwrap().price(), dec!(0.45));
//! assert_eq!(book.best_ask().unwrap().price(), dec!(0.46));
//! ```

use rust_decimal::Decimal;
use serde::Deserialize;

use super::error::DomainError;
use super::id::MarketId;
use super::money::{Price, Volume};

/// A single price level in an order book.
///
/// Represents aggregated orders at a specific price point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "(Price, Volume)")]
pub struct PriceLevel {
    price: Price,
    size: Volume,
}

impl PriceLevel {
    /// Creates a new price level.
    #[must_use]
    pub const fn new(price: Price, size: Volume) -> Self {
        Self { price, size }
    }

    /// Returns the price at this level.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Returns the total volume available at this level.
    #[must_use]
    pub const fn size(&self) -> Volume {
        self.size
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.price <= Decimal::ZERO {
            return Err(DomainError::NonPositivePrice { price: self.price });
        }
        if self.size <= Decimal::ZERO {
            return Err(DomainError::NonPositiveSize { size: self.size });
        }
        Ok(())
    }
}

impl From<(Price, Volume)> for PriceLevel {
    fn from((price, size): (Price, Volume)) -> Self {
        Self::new(price, size)
    }
}

/// Immutable order book snapshot for a single market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    market_id: MarketId,
    bids: Vec<PriceLevel>,
    asks: Vec<PriceLevel>,
}

impl Book {
    /// Creates an empty book, the degraded snapshot returned when a fetch fails.
    #[must_use]
    pub const fn empty(market_id: MarketId) -> Self {
        Self {
            market_id,
            bids: Vec::new(),
            asks: Vec::new(),
        }
    }

    /// Creates a book from levels the caller already knows to be ordered.
    ///
    /// No validation is performed; use [`Book::try_with_levels`] for data of
    /// unknown provenance or check [`Book::is_well_formed`] before use.
    #[must_use]
    pub const fn with_levels(
        market_id: MarketId,
        bids: Vec<PriceLevel>,
        asks: Vec<PriceLevel>,
    ) -> Self {
        Self {
            market_id,
            bids,
            asks,
        }
    }

    /// Creates a book, rejecting unordered or non-positive levels.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] describing the first violated invariant.
    pub fn try_with_levels(
        market_id: MarketId,
        bids: Vec<PriceLevel>,
        asks: Vec<PriceLevel>,
    ) -> Result<Self, DomainError> {
        let book = Self::with_levels(market_id, bids, asks);
        book.validate()?;
        Ok(book)
    }

    /// Checks both sides against the ordering and positivity invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, scanning bids before asks.
    pub fn validate(&self) -> Result<(), DomainError> {
        for level in self.bids.iter().chain(&self.asks) {
            level.validate()?;
        }
        for pair in self.bids.windows(2) {
            if pair[1].price >= pair[0].price {
                return Err(DomainError::BidsNotDescending {
                    previous: pair[0].price,
                    next: pair[1].price,
                });
            }
        }
        for pair in self.asks.windows(2) {
            if pair[1].price <= pair[0].price {
                return Err(DomainError::AsksNotAscending {
                    previous: pair[0].price,
                    next: pair[1].price,
                });
            }
        }
        Ok(())
    }

    /// Returns true when the book satisfies every snapshot invariant.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.validate().is_ok()
    }

    /// Returns the market this book belongs to.
    #[must_use]
    pub const fn market_id(&self) -> &MarketId {
        &self.market_id
    }

    /// Returns all bid levels (sorted by price descending).
    #[must_use]
    pub fn bids(&self) -> &[PriceLevel] {
        &self.bids
    }

    /// Returns all ask levels (sorted by price ascending).
    #[must_use]
    pub fn asks(&self) -> &[PriceLevel] {
        &self.asks
    }

    /// Returns the best bid (highest buy price).
    #[must_use]
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    /// Returns the best ask (lowest sell price).
    #[must_use]
    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }

    /// Returns true if both sides are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}
