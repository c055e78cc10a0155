//! Mutable price ladder backing a paper market.

use rust_decimal::Decimal;

use crate::domain::{Book, MarketId, OrderSide, Price, PriceLevel, Volume};

/// Result of sweeping the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Sweep {
    pub filled: Volume,
    pub notional: Decimal,
}

#[derive(Debug, Clone)]
pub(super) struct Ladder {
    bids: Vec<PriceLevel>,
    asks: Vec<PriceLevel>,
}

impl Ladder {
    pub fn from_book(book: &Book) -> Self {
        Self {
            bids: book.bids().to_vec(),
            asks: book.asks().to_vec(),
        }
    }

    pub fn snapshot(&self, market: &MarketId) -> Book {
        Book::with_levels(market.clone(), self.bids.clone(), self.asks.clone())
    }

    /// What an order would fill right now, without touching the ladder.
    pub fn preview(&self, side: OrderSide, limit: Price, size: Volume) -> Sweep {
        self.clone().take(side, limit, size)
    }

    /// Consume resting liquidity at `limit` or better, up to `size`.
    pub fn take(&mut self, side: OrderSide, limit: Price, size: Volume) -> Sweep {
        let levels = match side {
            OrderSide::Buy => &mut self.asks,
            OrderSide::Sell => &mut self.bids,
        };

        let mut remaining = size;
        let mut notional = Decimal::ZERO;
        for level in levels.iter_mut() {
            let crosses = match side {
                OrderSide::Buy => level.price() <= limit,
                OrderSide::Sell => level.price() >= limit,
            };
            if remaining <= Decimal::ZERO || !crosses {
                break;
            }
            let qty = level.size().min(remaining);
            notional += qty * level.price();
            remaining -= qty;
            *level = PriceLevel::new(level.price(), level.size() - qty);
        }
        levels.retain(|level| level.size() > Decimal::ZERO);

        Sweep {
            filled: size - remaining,
            notional,
        }
    }
}
