//! End-to-end runs over paper venues wired from configuration.

use std::time::Duration;

use crossarb::application::strategy::{CycleOutcome, RunnerState};
use crossarb::domain::{MarketId, TradeResult, VenueId};
use crossarb::infrastructure::config::Config;
use crossarb::infrastructure::orchestration::orchestrator::Orchestrator;
use crossarb::infrastructure::orchestration::Runtime;
use rust_decimal_macros::dec;
use tokio::sync::watch;

const CONFIG: &str = r#"
[[venues]]
id = "alpha"
kind = "paper"
balance = "100"

[[venues.markets]]
id = "fed-cut"
bids = [["0.60", "10"], ["0.55", "5"]]

[[venues]]
id = "beta"
kind = "paper"
balance = "100"

[[venues.markets]]
id = "FED-CUT"
asks = [["0.50", "8"], ["0.58", "3"]]

[[strategies]]
id = "fed"
period_ms = 600000
profit_model = "mirrored"
source = { venue = "alpha", market = "fed-cut" }
target = { venue = "beta", market = "FED-CUT" }
"#;

const BROKEN_STRATEGY: &str = r#"
[[strategies]]
id = "broken"
period_ms = 600000
profit_model = "mirrored"
source = { venue = "alpha", market = "not-listed" }
target = { venue = "beta", market = "FED-CUT" }
"#;

#[tokio::test]
async fn paper_cycle_settles_both_venues() {
    let config = Config::parse_toml(CONFIG).unwrap();
    let runtime = Runtime::start(&config).await.unwrap();
    let runner = &runtime.runners()[0];
    assert_eq!(runner.state(), RunnerState::Running);

    let CycleOutcome::Completed(report) = runner.run_cycle().await else {
        panic!("cycle did not complete");
    };
    assert_eq!(report.matched.total_profit(), dec!(0.84));
    assert_eq!(
        report.execution.unwrap().results(),
        &[TradeResult::Hedged, TradeResult::Hedged]
    );

    let alpha = runtime.venue(&VenueId::new("alpha")).unwrap();
    let beta = runtime.venue(&VenueId::new("beta")).unwrap();
    assert_eq!(alpha.fetch_balance().await, dec!(106.00));
    assert_eq!(beta.fetch_balance().await, dec!(94.84));

    let book = alpha.fetch_order_book(&MarketId::new("fed-cut")).await.unwrap();
    assert_eq!(book.best_bid().unwrap().price(), dec!(0.55));

    let CycleOutcome::Completed(report) = runner.run_cycle().await else {
        panic!("cycle did not complete");
    };
    assert!(report.matched.is_empty());
    runtime.stop();
}

#[tokio::test]
async fn global_dry_run_leaves_balances_alone() {
    let mut config = Config::parse_toml(CONFIG).unwrap();
    config.dry_run = true;
    let runtime = Runtime::start(&config).await.unwrap();

    let CycleOutcome::Completed(report) = runtime.runners()[0].run_cycle().await else {
        panic!("cycle did not complete");
    };
    assert!(report.execution.is_none());
    let alpha = runtime.venue(&VenueId::new("alpha")).unwrap();
    assert_eq!(alpha.fetch_balance().await, dec!(100));
    runtime.stop();
}

#[tokio::test]
async fn failing_strategy_does_not_block_others() {
    let config = Config::parse_toml(&format!("{CONFIG}{BROKEN_STRATEGY}")).unwrap();
    let runtime = Runtime::start(&config).await.unwrap();

    assert_eq!(runtime.runners()[0].state(), RunnerState::Running);
    assert_eq!(runtime.runners()[1].state(), RunnerState::Idle);
    runtime.stop();
}

#[tokio::test]
async fn shutdown_signal_ends_the_run() {
    let config = Config::parse_toml(CONFIG).unwrap();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let handle = tokio::spawn(Orchestrator::run_with_shutdown(config, shutdown_rx));
    shutdown_tx.send(true).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("runtime stopped")
        .unwrap();
    assert!(result.is_ok());
}
