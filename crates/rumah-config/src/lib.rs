//! Configuration for the rumah panel TUI.
//!
//! TOML file + `RUMAH_*` environment overrides, and translation to
//! `rumah_core::PanelConfig`.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use rumah_core::PanelConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Backend base URL.
    #[serde(default = "default_url")]
    pub url: String,

    /// Poll interval in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Log file path (logs never go to the terminal).
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: default_url(),
            poll_interval_secs: default_poll_interval(),
            timeout_secs: default_timeout(),
            log_file: None,
        }
    }
}

fn default_url() -> String {
    "http://127.0.0.1:5000".into()
}
fn default_poll_interval() -> u64 {
    2
}
fn default_timeout() -> u64 {
    10
}

impl Config {
    /// Validate and translate to a `PanelConfig` for `rumah_core::Panel`.
    pub fn to_panel_config(&self) -> Result<PanelConfig, ConfigError> {
        let url: url::Url = self.url.parse().map_err(|_| ConfigError::Validation {
            field: "url".into(),
            reason: format!("invalid URL: {}", self.url),
        })?;

        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Validation {
                field: "poll_interval_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "timeout_secs".into(),
                reason: "must be at least 1".into(),
            });
        }

        Ok(PanelConfig {
            url,
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "rumah", "rumah").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("rumah");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the Config from the canonical path + `RUMAH_*` environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Load the Config from a specific TOML file + environment overrides.
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("RUMAH_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sane() {
        let cfg = Config::default();
        assert_eq!(cfg.url, "http://127.0.0.1:5000");
        assert_eq!(cfg.poll_interval_secs, 2);
        assert_eq!(cfg.timeout_secs, 10);
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = load_config_from(std::path::Path::new("/nonexistent/rumah.toml"))
            .expect("defaults apply");
        assert_eq!(cfg.poll_interval_secs, 2);
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "url = \"http://panel.local:5000\"\npoll_interval_secs = 5"
        )
        .expect("write TOML");

        let cfg = load_config_from(file.path()).expect("config loads");
        assert_eq!(cfg.url, "http://panel.local:5000");
        assert_eq!(cfg.poll_interval_secs, 5);
        // untouched field keeps its default
        assert_eq!(cfg.timeout_secs, 10);
    }

    #[test]
    fn translation_to_panel_config() {
        let cfg = Config {
            url: "http://10.0.0.7:5000".into(),
            poll_interval_secs: 3,
            timeout_secs: 7,
            log_file: None,
        };
        let panel = cfg.to_panel_config().expect("valid config");
        assert_eq!(panel.url.as_str(), "http://10.0.0.7:5000/");
        assert_eq!(panel.poll_interval, Duration::from_secs(3));
        assert_eq!(panel.timeout, Duration::from_secs(7));
    }

    #[test]
    fn invalid_url_is_rejected() {
        let cfg = Config {
            url: "not a url".into(),
            ..Config::default()
        };
        assert!(matches!(
            cfg.to_panel_config(),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let cfg = Config {
            poll_interval_secs: 0,
            ..Config::default()
        };
        assert!(matches!(
            cfg.to_panel_config(),
            Err(ConfigError::Validation { .. })
        ));
    }
}
