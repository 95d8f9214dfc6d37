//! End-to-end scenarios across loading, querying and option projection
//!
//! These tests exercise the complete flow: config file -> container ->
//! queries -> runtime settings.

use std::collections::HashMap;
use std::path::PathBuf;

use config_container::{
    ConfigContainer, Node, RuntimeSettings, ScalarOptionSink, Value, env_from,
};
use config_test_utils::FailingSink;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/configs")
        .join(name)
}

#[rstest]
#[case("app.toml")]
#[case("app.json")]
#[case("app.yaml")]
fn test_every_format_loads_the_same_tree(#[case] name: &str) {
    let reference = ConfigContainer::load(fixture("app.json")).unwrap();
    let config = ConfigContainer::load(fixture(name)).unwrap();

    assert_eq!(config, reference);
    assert_eq!(config.len(), 13);
}

#[test]
fn test_query_and_search_over_loaded_config() {
    let config = ConfigContainer::load(fixture("app.toml")).unwrap();

    let hosts = config.query("*.host");
    assert_eq!(
        hosts.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["database.primary.host", "database.replica.host", "server.host"]
    );

    let ports = config.search("/^database\\..*\\.port$/").unwrap();
    assert_eq!(
        ports.values().cloned().collect::<Vec<_>>(),
        vec![Value::Integer(5432), Value::Integer(5433)]
    );

    let databases = config.filter_keys("/^database\\.([^.]+)\\./").unwrap();
    assert_eq!(databases, vec!["primary", "replica"]);
}

#[test]
fn test_runtime_overrides_then_projection() {
    let mut config = ConfigContainer::load(fixture("app.yaml")).unwrap();

    let environment = HashMap::from([
        ("APP_DEBUG".to_string(), "True".to_string()),
        ("PHP_MEMORY_LIMIT".to_string(), "512M".to_string()),
    ]);

    if let Some(debug) = env_from(&environment, "APP_DEBUG", None) {
        config.set("debug", debug);
    }
    if let Some(limit) = env_from(&environment, "PHP_MEMORY_LIMIT", None) {
        config.set("php.memory_limit", limit);
    }
    let timeout = env_from(&environment, "APP_TIMEOUT", Some(Value::Integer(30)));
    config.set("server.timeout", timeout.unwrap_or(Value::Null));

    assert_eq!(config.get("debug").and_then(Node::as_bool), Some(true));
    assert_eq!(config.get("server.timeout").and_then(Node::as_i64), Some(30));

    let mut settings = RuntimeSettings::with_known_options([
        ("memory_limit", "128M"),
        ("display_errors", "1"),
        ("precision", "17"),
        ("date.timezone", ""),
    ]);
    let applied = config.apply_options_from_node("php", &mut settings).unwrap();

    assert_eq!(applied, 4);
    assert_eq!(settings.get_scalar_option("memory_limit").unwrap(), "512M");
    assert_eq!(settings.get_scalar_option("display_errors").unwrap(), "0");
    assert_eq!(settings.get_scalar_option("date.timezone").unwrap(), "UTC");
}

#[test]
fn test_projection_failure_is_not_rolled_back() {
    let config = ConfigContainer::load(fixture("app.json")).unwrap();
    let mut sink = FailingSink::rejecting(["precision"]);

    let err = config.apply_options_from_node("php", &mut sink).unwrap_err();

    assert!(err.to_string().contains("precision"));
    assert_eq!(
        sink.applied_keys(),
        vec!["date.timezone", "display_errors", "memory_limit"]
    );
}

#[test]
fn test_overwriting_a_section_discards_it() {
    let mut config = ConfigContainer::load(fixture("app.toml")).unwrap();
    config.set("database", "sqlite://memory");

    assert!(config.query("database.*").is_empty());
    assert_eq!(config.get("database").and_then(Node::as_str), Some("sqlite://memory"));
    assert_eq!(config.get_or("database.primary.host", "none"), Node::from("none"));
}
