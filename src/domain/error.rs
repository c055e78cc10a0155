//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_*` constructors when an order book
//! snapshot violates its ordering or positivity invariants.
//!
//! # Examples
//!
//! ```
//! use crossarb::domain::book::{Book, PriceLevel};
//! use crossarb::domain::error::DomainError;
//! use crossarb::domain::id::MarketId;
//! use rust_decimal_macros::dec;
//!
//! // Bids must be strictly descending
//! let result = Book::try_with_levels(
//!     MarketId::new("market-1"),
//!     vec![
//!         PriceLevel::new(dec!(0.40), dec!(10)),
//!         PriceLevel::new(dec!(0.45), dec!(10)),
//!     ],
//!     vec![],
//! );
//!
//! assert!(matches!(result, Err(DomainError::BidsNotDescending { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Price levels must carry a positive price.
    #[error("price must be positive, got {price}")]
    NonPositivePrice {
        /// The invalid price.
        price: Decimal,
    },

    /// Price levels must carry a positive size.
    #[error("size must be positive, got {size}")]
    NonPositiveSize {
        /// The invalid size.
        size: Decimal,
    },

    /// Bid levels must be strictly descending by price.
    #[error("bid {next} does not descend below previous bid {previous}")]
    BidsNotDescending {
        /// Price of the earlier (better) level.
        previous: Decimal,
        /// Price of the offending level.
        next: Decimal,
    },

    /// Ask levels must be strictly ascending by price.
    #[error("ask {next} does not ascend above previous ask {previous}")]
    AsksNotAscending {
        /// Price of the earlier (better) level.
        previous: Decimal,
        /// Price of the offending level.
        next: Decimal,
    },
}
