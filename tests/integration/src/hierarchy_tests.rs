//! End-to-end tests for layered configuration
//!
//! These tests exercise the complete flow: sources loaded from their medium,
//! composed into one hierarchy, read back through a single key space and
//! saved as a document.

use pretty_assertions::assert_eq;
use strata_core::{CompositeConfig, ConfigMap, Configurable, FlatStore, Value};
use strata_sources::{EnvConfig, FileConfig, Loadable, logging};
use strata_test_utils::{TestDir, fixtures};

fn defaults() -> ConfigMap {
    ConfigMap::from([
        ("postgres.port".to_string(), Value::Int(5432)),
        ("log_level".to_string(), Value::from("info")),
        ("test".to_string(), Value::from("from defaults")),
    ])
}

/// Application-style stack: explicit overrides, then environment, then a
/// config file, then defaults.
fn build_stack(dir: &TestDir) -> CompositeConfig {
    let _ = logging::init();

    let mut env = EnvConfig::new("APP", ["postgres"]);
    env.load_from([
        ("APP_POSTGRES_HOST", "db.internal"),
        ("APP_LOG_LEVEL", "debug"),
        ("UNRELATED", "ignored"),
    ]);

    let mut file = FileConfig::new(dir.write("config.json", fixtures::VALID_JSON));
    file.load().unwrap();

    let mut root = CompositeConfig::new(None);
    root.reset_defaults(defaults());
    root.use_child("env", Box::new(env));
    root.use_child("file", Box::new(file));
    root
}

#[test]
fn test_hierarchy_example() {
    let mut conf = CompositeConfig::new(None);
    conf.use_child("second", Box::new(CompositeConfig::new(None)));
    conf.child_mut("second")
        .unwrap()
        .set("asd", Value::from("abc"));

    assert_eq!(conf.get_string("asd"), "abc");
}

#[test]
fn test_defaults_example() {
    let mut conf = CompositeConfig::new(None);
    conf.reset_defaults(ConfigMap::from([
        ("test_default".to_string(), Value::from("123")),
        ("test_default_b".to_string(), Value::from("321")),
    ]));
    conf.use_child("second", Box::new(CompositeConfig::new(None)));
    conf.child_mut("second")
        .unwrap()
        .set("test_default", Value::from("333"));

    assert_eq!(conf.get_string("test_default"), "333");
    assert_eq!(conf.get_string("test_default_b"), "321");
}

#[test]
fn test_construction_example() {
    let mut store = FlatStore::new();
    store.set("example1", Value::from("123"));
    assert_eq!(store.get_string("example1"), "123");

    let conf = CompositeConfig::new(Some(Box::new(store)));
    assert_eq!(
        conf.all(),
        ConfigMap::from([("example1".to_string(), Value::from("123"))])
    );
}

#[test]
fn test_sources_compose_by_precedence() {
    let dir = TestDir::new();
    let mut conf = build_stack(&dir);

    // env beats defaults, file fills what env lacks
    assert_eq!(conf.get_string("log_level"), "debug");
    assert_eq!(conf.get_string("postgres.host"), "db.internal");
    assert_eq!(conf.get_int("postgres.port"), 5432);
    assert_eq!(conf.get_string("test"), "123");
    assert_eq!(conf.get_int("test_array[0].id"), 1);
    assert_eq!(conf.get("test_array.length"), Some(Value::Int(3)));
    assert_eq!(conf.get("unrelated"), None);

    conf.set("Log_Level", Value::from("trace"));
    assert_eq!(conf.get_string("LOG_LEVEL"), "trace");
    assert_eq!(conf.child("env").unwrap().get_string("log_level"), "debug");
}

#[test]
fn test_snapshot_matches_lookups() {
    let dir = TestDir::new();
    let mut conf = build_stack(&dir);
    conf.set("explicit", Value::Bool(true));

    let all = conf.all();
    assert_eq!(all.get("log_level"), Some(&Value::from("debug")));
    assert_eq!(all.get("test"), Some(&Value::from("123")));
    for (key, value) in &all {
        assert_eq!(conf.get(key).as_ref(), Some(value), "key {key}");
    }
}

#[test]
fn test_save_composed_snapshot_and_reload() {
    let dir = TestDir::new();
    let conf = build_stack(&dir);
    let expected = conf.all();

    let saved = FileConfig::wrap(dir.path("merged.yaml"), Box::new(conf));
    saved.save().unwrap();

    let mut reloaded = FileConfig::new(dir.path("merged.yaml"));
    reloaded.load().unwrap();

    assert_eq!(reloaded.all(), expected);
    assert_eq!(reloaded.get_string("double_nested.nested_object.test_inner"), "foo");
    assert_eq!(reloaded.get_string("postgres.host"), "db.internal");
}

#[test]
fn test_json_round_trip_example() {
    let dir = TestDir::new();
    let mut conf = CompositeConfig::new(None);
    conf.set("some", Value::from("variable"));

    let json = FileConfig::wrap(dir.path("config.json"), Box::new(conf));
    json.save().unwrap();

    let mut reloaded = FileConfig::new(dir.path("config.json"));
    reloaded.load().unwrap();
    assert_eq!(reloaded.get_string("some"), "variable");

    let raw: serde_json::Value = serde_json::from_str(&dir.read("config.json")).unwrap();
    assert_eq!(raw, serde_json::json!({"some": "variable"}));
}
