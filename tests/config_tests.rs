use std::io::Write;
use std::path::Path;

use crossarb::error::{ConfigError, Error};
use crossarb::infrastructure::config::{Config, VenueSettings};
use crossarb::domain::ProfitModel;
use rust_decimal_macros::dec;
use tempfile::NamedTempFile;

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

const TWO_VENUES: &str = r#"
[[venues]]
id = "alpha"
kind = "paper"

[[venues]]
id = "beta"
kind = "paper"
"#;

#[test]
fn example_config_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.example.toml");
    let config = Config::load(path).unwrap();

    assert_eq!(config.venues.len(), 2);
    assert_eq!(config.strategies.len(), 1);
    let strategy = &config.strategies[0];
    assert_eq!(strategy.profit_model, ProfitModel::Mirrored);
    assert_eq!(strategy.params.min_tradable_size, dec!(1));
    let VenueSettings::Paper(alpha) = &config.venues[0].settings;
    assert_eq!(alpha.markets[0].bids.len(), 2);
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(dir.path().join("absent.toml"));

    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn loads_strategy_with_defaults() {
    let file = write_temp_config(&format!(
        r#"{TWO_VENUES}
[[strategies]]
id = "s"
profit_model = "COMPLEMENTARY"
source = {{ venue = "alpha", market = "yes" }}
target = {{ venue = "beta", market = "no" }}
"#
    ));

    let config = Config::load(file.path()).unwrap();
    let strategy = &config.strategies[0];
    assert!(strategy.enabled);
    assert_eq!(strategy.period_ms, 5_000);
    assert_eq!(strategy.profit_model, ProfitModel::Complementary);
    assert_eq!(strategy.params.min_balance_floor, dec!(1));
    assert!(!strategy.params.dry_run);
}

#[test]
fn rejects_duplicate_strategy_ids() {
    let strategy = r#"
[[strategies]]
id = "dup"
profit_model = "mirrored"
source = { venue = "alpha", market = "x" }
target = { venue = "beta", market = "y" }
"#;
    let file = write_temp_config(&format!("{TWO_VENUES}{strategy}{strategy}"));

    match Config::load(file.path()) {
        Err(Error::Config(ConfigError::DuplicateId { kind: "strategy", id })) => {
            assert_eq!(id, "dup");
        }
        Err(err) => panic!("Expected duplicate strategy error, got {err}"),
        Ok(_) => panic!("Expected duplicate strategy error"),
    }
}

#[test]
fn rejects_non_positive_tradable_size() {
    let file = write_temp_config(&format!(
        r#"{TWO_VENUES}
[[strategies]]
id = "s"
profit_model = "mirrored"
source = {{ venue = "alpha", market = "x" }}
target = {{ venue = "beta", market = "y" }}

[strategies.params]
min_tradable_size = "0"
"#
    ));

    match Config::load(file.path()) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "min_tradable_size",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid tradable size, got {err}"),
        Ok(_) => panic!("Expected invalid tradable size"),
    }
}

#[test]
fn rejects_negative_floor() {
    let file = write_temp_config(&format!(
        r#"{TWO_VENUES}
[[strategies]]
id = "s"
profit_model = "mirrored"
source = {{ venue = "alpha", market = "x" }}
target = {{ venue = "beta", market = "y" }}

[strategies.params]
min_balance_floor = "-1"
"#
    ));

    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "min_balance_floor",
            ..
        }))
    ));
}

#[test]
fn rejects_unknown_venue_kind() {
    let file = write_temp_config(
        r#"
[[venues]]
id = "alpha"
kind = "carrier-pigeon"
"#,
    );

    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}
