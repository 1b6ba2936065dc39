use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub debounce_ms: u64,
    pub request_timeout_secs: u64,
    pub export_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000/api".into(),
            debounce_ms: 500,
            request_timeout_secs: 30,
            export_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn apply_file(&mut self, file: FileSettings) {
        if let Some(v) = file.api_base_url {
            self.api_base_url = v;
        }
        if let Some(v) = file.debounce_ms {
            self.debounce_ms = v;
        }
        if let Some(v) = file.request_timeout_secs {
            self.request_timeout_secs = v;
        }
        if let Some(v) = file.export_dir {
            self.export_dir = v;
        }
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("DASHBOARD_API_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = lookup("APP__API_BASE_URL") {
            self.api_base_url = v;
        }

        if let Some(v) = lookup("APP__DEBOUNCE_MS") {
            if let Ok(parsed) = v.parse::<u64>() {
                self.debounce_ms = parsed;
            }
        }
        if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
            if let Ok(parsed) = v.parse::<u64>() {
                self.request_timeout_secs = parsed;
            }
        }

        if let Some(v) = lookup("APP__EXPORT_DIR") {
            self.export_dir = PathBuf::from(v);
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    debounce_ms: Option<u64>,
    request_timeout_secs: Option<u64>,
    export_dir: Option<PathBuf>,
}

/// Defaults, then the config file, then `APP__*` environment overrides.
///
/// An explicitly named config file must exist; the default
/// `dashboard.toml` is optional.
pub fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    let raw = match config_path {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read config '{}'", path.display()))?,
        ),
        None => fs::read_to_string(DEFAULT_CONFIG_FILE).ok(),
    };
    resolve_settings(raw.as_deref(), |key| std::env::var(key).ok())
}

pub fn resolve_settings(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        let file = toml::from_str::<FileSettings>(raw).context("invalid dashboard config")?;
        settings.apply_file(file);
    }
    settings.apply_env(env);

    settings.api_base_url = normalize_api_url(&settings.api_base_url)?;
    Ok(settings)
}

/// Trims whitespace and trailing slashes; only http(s) urls are accepted.
pub fn normalize_api_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(Settings::default().api_base_url);
    }

    let parsed = Url::parse(trimmed).with_context(|| format!("invalid api url '{trimmed}'"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => bail!("unsupported api url scheme '{other}' in '{trimmed}'"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
