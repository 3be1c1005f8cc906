#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn default_matches_consts() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.padding, 3.0);
    assert_eq!(cfg.handle_size, 6.0);
    assert_eq!(cfg.rotate_offset, 30.0);
    assert_eq!(cfg.copy_offset, 10.0);
    assert_eq!(cfg.min_width, 10.0);
    assert_eq!(cfg.min_height, 10.0);
    assert_eq!(cfg.extend_step, 300.0);
    assert!(cfg.resize_x);
    assert!(cfg.resize_y);
}

#[test]
fn from_lookup_empty_gives_defaults() {
    let cfg = EngineConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, EngineConfig::default());
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = EngineConfig::from_lookup(lookup_from(&[
        (ENV_PADDING, "5"),
        (ENV_HANDLE_SIZE, " 8.5 "),
        (ENV_COPY_OFFSET, "20"),
        (ENV_RESIZE_X, "false"),
        (ENV_RESIZE_Y, "OFF"),
    ]))
    .unwrap();
    assert_eq!(cfg.padding, 5.0);
    assert_eq!(cfg.handle_size, 8.5);
    assert_eq!(cfg.copy_offset, 20.0);
    assert!(!cfg.resize_x);
    assert!(!cfg.resize_y);
    assert_eq!(cfg.min_width, 10.0);
}

#[test]
fn from_lookup_rejects_garbage_number() {
    let err = EngineConfig::from_lookup(lookup_from(&[(ENV_MIN_WIDTH, "wide")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidNumber { var: ENV_MIN_WIDTH.into(), value: "wide".into() });
    assert!(err.to_string().contains("DRAGBOARD_MIN_WIDTH"));
}

#[test]
fn from_lookup_rejects_garbage_flag() {
    let err = EngineConfig::from_lookup(lookup_from(&[(ENV_RESIZE_Y, "maybe")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidFlag { .. }));
}

#[test]
fn from_lookup_rejects_negative() {
    let err = EngineConfig::from_lookup(lookup_from(&[(ENV_PADDING, "-1")])).unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange { .. }));
}

#[test]
fn validate_rejects_non_finite() {
    let cfg = EngineConfig { handle_size: f64::INFINITY, ..EngineConfig::default() };
    assert!(cfg.validate().is_err());
}

#[test]
fn from_env_reads_prefixed_vars() {
    // Only this test touches DRAGBOARD_* variables.
    unsafe { std::env::set_var(ENV_EXTEND_STEP, "120") };
    let cfg = EngineConfig::from_env().unwrap();
    unsafe { std::env::remove_var(ENV_EXTEND_STEP) };
    assert_eq!(cfg.extend_step, 120.0);
}
