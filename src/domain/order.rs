//! Order snapshots as reported back by a venue.
//!
//! The lifecycle of an order is owned entirely by the venue. The engine reads
//! these snapshots (e.g. to cancel leftovers) but never mutates them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{MarketId, OrderId};
use super::money::{Price, Volume};

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order.
    Buy,
    /// Sell order.
    Sell,
}

impl OrderSide {
    /// The side that trades against this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Order state as last reported by the venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Resting on the book, possibly partially filled.
    Open,
    /// Completely filled.
    Filled,
    /// Cancelled by the owner or by the venue.
    Cancelled,
}

/// How the order was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderKind {
    /// Good-till-cancelled limit order.
    Limit,
    /// Immediate-or-cancel; any unfilled remainder is cancelled by the venue.
    ImmediateOrCancel,
}

/// Snapshot of an order on a venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: OrderSide,
    pub price: Price,
    pub size: Volume,
    pub filled_size: Volume,
    pub market_id: MarketId,
    pub status: OrderStatus,
    /// `None` for orders that never expire.
    pub expiry: Option<DateTime<Utc>>,
    pub kind: OrderKind,
}

impl Order {
    /// Size still waiting to be filled.
    #[must_use]
    pub fn remaining(&self) -> Volume {
        self.size - self.filled_size
    }

    /// True while the order can still trade.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }
}
