//! Application orchestration.
//!
//! Runtime wiring and lifecycle management: venues are built and
//! initialized, strategies are started, and everything is stopped again on
//! shutdown.

pub mod orchestrator;
mod runtime;

pub use runtime::Runtime;
