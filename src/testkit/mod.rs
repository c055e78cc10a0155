//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`venue`] - [`ScriptedVenue`](venue::ScriptedVenue), a mock
//!   [`Venue`](crate::port::outbound::Venue) with a call log.
//! - [`domain`] - Builders for books and identifiers.
//! - [`config`] - Canonical strategy configurations.

pub mod config;
pub mod domain;
pub mod venue;
