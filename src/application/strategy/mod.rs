//! Strategy configuration, cycle body and periodic runner.

mod config;
mod cycle;
mod runner;

pub use config::{LegConfig, StrategyConfig, StrategyParams};
pub use cycle::{Cycle, CycleOutcome, CycleReport};
pub use runner::{RunnerState, StrategyRunner};
