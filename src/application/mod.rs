//! Application services (use cases).
//!
//! These services orchestrate domain logic through the venue port:
//!
//! - [`matcher`] - Pure two-pointer crossing detection
//! - [`execution`] - Sequential two-leg IOC execution
//! - [`strategy`] - Per-strategy cycle and periodic runner

pub mod execution;
pub mod matcher;
pub mod strategy;
