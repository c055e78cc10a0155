#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use crossarb::application::strategy::{StrategyConfig, StrategyRunner};
use crossarb::testkit::{config, domain};
use crossarb::testkit::venue::ScriptedVenue;
use rust_decimal_macros::dec;

/// Source bids `0.60 x 10, 0.55 x 5` against target asks `0.50 x 8,
/// 0.58 x 3`: two crossings of sizes 8 and 2, total profit 0.84.
pub fn worked_example_venues() -> (Arc<ScriptedVenue>, Arc<ScriptedVenue>) {
    let source = ScriptedVenue::new("source").with_book(domain::book(
        "source-market",
        &[(dec!(0.60), dec!(10)), (dec!(0.55), dec!(5))],
        &[],
    ));
    let target = ScriptedVenue::new("target").with_book(domain::book(
        "target-market",
        &[],
        &[(dec!(0.50), dec!(8)), (dec!(0.58), dec!(3))],
    ));
    (Arc::new(source), Arc::new(target))
}

/// A single crossing: buy 5 on target at 0.50, sell on source at 0.60.
pub fn single_crossing_venues() -> (Arc<ScriptedVenue>, Arc<ScriptedVenue>) {
    let source = ScriptedVenue::new("source").with_book(domain::book(
        "source-market",
        &[(dec!(0.60), dec!(10))],
        &[],
    ));
    let target = ScriptedVenue::new("target").with_book(domain::book(
        "target-market",
        &[],
        &[(dec!(0.50), dec!(5))],
    ));
    (Arc::new(source), Arc::new(target))
}

pub fn runner(source: &Arc<ScriptedVenue>, target: &Arc<ScriptedVenue>) -> StrategyRunner {
    runner_with(config::strategy(), source, target)
}

pub fn runner_with(
    config: StrategyConfig,
    source: &Arc<ScriptedVenue>,
    target: &Arc<ScriptedVenue>,
) -> StrategyRunner {
    StrategyRunner::new(config, source.clone(), target.clone())
}

/// Let spawned tasks run to their next await point.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Advance the paused clock and let woken tasks run.
pub async fn advance(duration: Duration) {
    tokio::time::sleep(duration).await;
    settle().await;
}
