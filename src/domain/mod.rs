//! Venue-agnostic domain types.
//!
//! - [`book`] - Immutable order book snapshots
//! - [`crossing`] - Profitable bid/ask pairings and the profit models
//! - [`order`] - Venue order snapshots
//! - [`trade`] - Two-leg execution outcomes

pub mod book;
pub mod crossing;
pub mod error;
pub mod id;
pub mod money;
pub mod order;
pub mod trade;

pub use book::{Book, PriceLevel};
pub use crossing::{Crossing, CrossingLeg, ProfitModel, Route};
pub use error::DomainError;
pub use id::{MarketId, OrderId, StrategyId, VenueId};
pub use money::{Balance, Price, Volume};
pub use order::{Order, OrderKind, OrderSide, OrderStatus};
pub use trade::TradeResult;
