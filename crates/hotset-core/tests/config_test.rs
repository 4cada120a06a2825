use hotset_core::config::*;
use hotset_core::HotsetError;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = HotsetConfig::from_toml("").unwrap();

    // Ranking defaults
    assert_eq!(config.ranking.top_n, 6);
    assert!(!config.ranking.pin_mode);
    assert_eq!(config.ranking.activation_weight, 1.0);
    assert_eq!(config.ranking.load_complete_weight, 0.5);

    // Scheduler defaults
    assert_eq!(config.scheduler.debounce_ms, 1_200);
    assert_eq!(config.scheduler.debounce().as_millis(), 1_200);

    // Eviction defaults
    assert_eq!(config.eviction.inactivity_threshold_secs, 600);
    assert_eq!(config.eviction.inactivity_threshold(), chrono::Duration::minutes(10));
    assert!(!config.eviction.never_suspend_active_work);

    // Storage defaults
    assert_eq!(config.storage.db_path, "hotset.db");
    assert_eq!(config.storage.snapshot_key, "snapshots");
    assert_eq!(config.storage.top_n_key, "topN");

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(config.observability.json);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[ranking]
top_n = 3
pin_mode = true

[eviction]
inactivity_threshold_secs = 30
"#;
    let config = HotsetConfig::from_toml(toml).unwrap();
    assert_eq!(config.ranking.top_n, 3);
    assert!(config.ranking.pin_mode);
    // Non-overridden fields keep defaults
    assert_eq!(config.ranking.activation_weight, 1.0);
    assert_eq!(config.eviction.inactivity_threshold_secs, 30);
    assert_eq!(config.scheduler.debounce_ms, 1_200);
}

#[test]
fn zero_top_n_is_rejected() {
    let err = HotsetConfig::from_toml("[ranking]\ntop_n = 0\n").unwrap_err();
    assert!(matches!(err, HotsetError::InvalidTopN { value: 0 }));
}

#[test]
fn negative_weight_is_rejected() {
    let err = HotsetConfig::from_toml("[ranking]\nactivation_weight = -1.0\n").unwrap_err();
    assert!(matches!(err, HotsetError::ConfigError { .. }));
    assert!(err.to_string().contains("activation_weight"));
}

#[test]
fn zero_debounce_is_rejected() {
    let err = HotsetConfig::from_toml("[scheduler]\ndebounce_ms = 0\n").unwrap_err();
    assert!(err.to_string().contains("debounce_ms"));
}

#[test]
fn malformed_toml_is_a_config_error() {
    let err = HotsetConfig::from_toml("[ranking\ntop_n = ").unwrap_err();
    assert!(matches!(err, HotsetError::ConfigError { .. }));
}

#[test]
fn config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hotset.toml");
    std::fs::write(&path, "[scheduler]\ndebounce_ms = 250\n").unwrap();

    let config = HotsetConfig::from_file(&path).unwrap();
    assert_eq!(config.scheduler.debounce_ms, 250);
}

#[test]
fn missing_file_is_a_config_error() {
    let err = HotsetConfig::from_file(std::path::Path::new("/nonexistent/hotset.toml")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/hotset.toml"));
}
