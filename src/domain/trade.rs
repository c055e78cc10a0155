//! Outcome of executing one crossing as two immediate-or-cancel legs.
//!
//! Two-leg trades can end three ways:
//! - **Hedged**: both legs filled, the spread is locked in
//! - **BuyRejected**: the first leg failed, no position was taken
//! - **Unhedged**: the buy filled but the sell did not, leaving one-sided
//!   exposure that nobody unwinds automatically
//!
//! # Examples
//!
//! ```
//! use crossarb::domain::trade::TradeResult;
//!
//! assert!(TradeResult::Hedged.is_hedged());
//! assert!(TradeResult::Unhedged.is_unhedged());
//! assert!(!TradeResult::BuyRejected.took_position());
//! ```

/// Result of executing a single crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeResult {
    /// Both legs executed.
    Hedged,
    /// The buy leg failed; the sell leg was never sent.
    BuyRejected,
    /// The buy leg executed and the sell leg failed.
    Unhedged,
}

impl TradeResult {
    #[must_use]
    pub const fn is_hedged(self) -> bool {
        matches!(self, Self::Hedged)
    }

    #[must_use]
    pub const fn is_unhedged(self) -> bool {
        matches!(self, Self::Unhedged)
    }

    /// True if at least the buy leg traded.
    #[must_use]
    pub const fn took_position(self) -> bool {
        matches!(self, Self::Hedged | Self::Unhedged)
    }
}
