//! crossarb - Cross-venue arbitrage matching and execution.
//!
//! Watches the same economic exposure listed on two venues, finds price
//! crossings between their order books and executes them as hedged
//! buy/sell pairs.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Books, orders, crossings and trade results
//! - [`port`] - The [`port::outbound::Venue`] trait every venue implements
//! - [`application`] - Matcher, executor and the periodic strategy runner
//! - [`adapter`] - Venue implementations (paper trading)
//! - [`infrastructure`] - Configuration, factories and runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `testkit` - Scripted venue and fixtures for tests
//!
//! # Example
//!
//! ```no_run
//! use crossarb::infrastructure::config::Config;
//! use crossarb::infrastructure::orchestration::orchestrator::Orchestrator;
//!
//! # async fn run() -> crossarb::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! Orchestrator::run(config).await
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
