//! Tests for configuration loading.

use akane_error::{AkaneErrorKind, ConfigErrorKind};
use akane_navigator::{AkaneConfig, NavigatorConfig, NavigatorConfigBuilder, TimeoutPolicy};
use std::io::Write;
use std::time::Duration;

fn toml_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn test_bundled_defaults() {
    let config = AkaneConfig::load().expect("bundled config loads");
    assert_eq!(*config.navigator.timeout_secs(), 180);
    assert_eq!(*config.navigator.timeout_policy(), TimeoutPolicy::Absolute);
    assert!(*config.navigator.show_page_counter());
    assert_eq!(*config.cache.max_size(), 256);
    assert_eq!(config.navigator.timeout(), Some(Duration::from_secs(180)));
}

#[test]
fn test_bundled_defaults_match_code_defaults() {
    let config = AkaneConfig::load().expect("bundled config loads");
    assert_eq!(config, AkaneConfig::default());
}

#[test]
fn test_explicit_file_overrides_fields() {
    let file = toml_file(
        r#"
        [navigator]
        timeout_secs = 30
        timeout_policy = "sliding"

        [cache]
        enabled = false
        "#,
    );
    let config = AkaneConfig::load_with(Some(file.path())).expect("override loads");
    assert_eq!(*config.navigator.timeout_secs(), 30);
    assert_eq!(*config.navigator.timeout_policy(), TimeoutPolicy::Sliding);
    // Untouched fields keep the bundled values
    assert!(*config.navigator.show_page_counter());
    assert!(!*config.cache.enabled());
    assert_eq!(*config.cache.ttl_secs(), 900);
}

#[test]
fn test_from_file_fills_missing_fields() {
    let file = toml_file("[navigator]\ntimeout_secs = 5\n");
    let config = AkaneConfig::from_file(file.path()).expect("partial file loads");
    assert_eq!(config.navigator.timeout(), Some(Duration::from_secs(5)));
    assert_eq!(*config.cache.max_size(), 256);
    assert!(!config.navigator.unauthorized_notice().is_empty());
}

#[test]
fn test_validation_rejects_disabled_timeout() {
    let file = toml_file("[navigator]\ntimeout_secs = 0\n");
    let err = AkaneConfig::from_file(file.path()).unwrap_err();
    let AkaneErrorKind::Config(config_err) = err.kind() else {
        panic!("expected a config error, got {err}");
    };
    assert_eq!(
        config_err.kind(),
        &ConfigErrorKind::Invalid {
            key: "navigator.timeout_secs",
            reason: "must be at least 1",
        }
    );
}

#[test]
fn test_navigator_config_alone_may_disable_timeout() {
    let config = NavigatorConfig::default().with_timeout_secs(0);
    assert_eq!(config.timeout(), None);
}

#[test]
fn test_validation_rejects_empty_notice() {
    let file = toml_file("[navigator]\nunauthorized_notice = \"  \"\n");
    let err = AkaneConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err.kind(), AkaneErrorKind::Config(_)));
}

#[test]
fn test_validation_rejects_zero_cache_size() {
    let file = toml_file("[cache]\nmax_size = 0\n");
    let err = AkaneConfig::load_with(Some(file.path())).unwrap_err();
    assert!(format!("{err}").contains("max_size"));
}

#[test]
fn test_unknown_policy_is_an_error() {
    let file = toml_file("[navigator]\ntimeout_policy = \"forever\"\n");
    assert!(AkaneConfig::from_file(file.path()).is_err());
}

#[test]
fn test_missing_file_is_an_error() {
    assert!(AkaneConfig::from_file("/nonexistent/akane.toml").is_err());
}

#[test]
fn test_config_round_trips_through_toml() {
    let config = AkaneConfig::default();
    let text = toml::to_string(&config).expect("serialize");
    let file = toml_file(&text);
    assert_eq!(AkaneConfig::from_file(file.path()).unwrap(), config);
}

#[test]
fn test_navigator_config_builder() {
    let config: NavigatorConfig = NavigatorConfigBuilder::default()
        .timeout_secs(45)
        .build()
        .unwrap();
    assert_eq!(config.timeout(), Some(Duration::from_secs(45)));
    assert_eq!(*config.timeout_policy(), TimeoutPolicy::Absolute);
}
