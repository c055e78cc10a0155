//! Monetary types for price, volume and balance representation.

use rust_decimal::Decimal;

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

/// Volume represented as a Decimal for precision.
pub type Volume = Decimal;

/// Spendable balance in the common settlement unit (USDC-equivalent).
pub type Balance = Decimal;
