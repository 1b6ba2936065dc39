use std::{collections::HashMap, path::PathBuf, time::Duration};

use super::*;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = resolve_settings(None, env_of(&[])).expect("settings");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.debounce(), Duration::from_millis(500));
}

#[test]
fn file_values_override_defaults() {
    let raw = r#"
        api_base_url = "https://club.example.org/api/"
        debounce_ms = 250
        export_dir = "exports"
    "#;
    let settings = resolve_settings(Some(raw), env_of(&[])).expect("settings");
    assert_eq!(settings.api_base_url, "https://club.example.org/api");
    assert_eq!(settings.debounce_ms, 250);
    assert_eq!(settings.request_timeout_secs, 30);
    assert_eq!(settings.export_dir, PathBuf::from("exports"));
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let raw = r#"api_base_url = "http://file.local/api""#;
    let settings = resolve_settings(
        Some(raw),
        env_of(&[
            ("DASHBOARD_API_URL", "http://legacy.local/api"),
            ("APP__API_BASE_URL", "http://env.local/api/"),
            ("APP__REQUEST_TIMEOUT_SECS", "5"),
        ]),
    )
    .expect("settings");
    assert_eq!(settings.api_base_url, "http://env.local/api");
    assert_eq!(settings.request_timeout(), Duration::from_secs(5));
}

#[test]
fn unparsable_numeric_env_is_ignored() {
    let settings =
        resolve_settings(None, env_of(&[("APP__DEBOUNCE_MS", "soon")])).expect("settings");
    assert_eq!(settings.debounce_ms, 500);
}

#[test]
fn malformed_file_is_an_error() {
    let err = resolve_settings(Some("debounce_ms = \"fast\""), env_of(&[]))
        .expect_err("bad toml");
    assert!(format!("{err:#}").contains("invalid dashboard config"));
}

#[test]
fn rejects_non_http_api_urls() {
    assert!(normalize_api_url("ftp://club.example.org").is_err());
    assert!(normalize_api_url("not a url").is_err());
    assert_eq!(
        normalize_api_url("  ").expect("blank falls back"),
        Settings::default().api_base_url
    );
}

#[test]
fn explicit_missing_config_file_fails() {
    let missing = std::env::temp_dir().join("admin_cli_missing_dashboard.toml");
    let err = load_settings(Some(&missing)).expect_err("missing file");
    assert!(err.to_string().contains("failed to read config"));
}
