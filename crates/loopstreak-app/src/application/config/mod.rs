use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use loopstreak_infrastructure::{DatabaseOptions, LedgerTimeouts};

pub const ENV_DATABASE_PATH: &str = "LOOPSTREAK_DATABASE_PATH";
pub const ENV_LOG_LEVEL: &str = "LOOPSTREAK_LOG_LEVEL";

/// Log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 1,
    Warn = 2,
    #[default]
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            5 => LogLevel::Trace,
            _ => LogLevel::Info,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Persistent configuration, stored as pretty JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: LogLevel,
    pub db_max_connections: u32,
    pub db_query_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = default_data_dir();
        Self {
            database_path: data_dir.join("loopstreak.db"),
            log_dir: data_dir.join("logs"),
            log_level: LogLevel::Info,
            db_max_connections: 5,
            db_query_timeout_ms: 10_000,
        }
    }
}

impl AppConfig {
    pub fn database_options(&self) -> DatabaseOptions {
        DatabaseOptions {
            max_connections: self.db_max_connections.max(1),
            timeouts: LedgerTimeouts::default()
                .with_query_timeout(Duration::from_millis(self.db_query_timeout_ms)),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("loopstreak")
}

/// Loads and persists [`AppConfig`].
pub struct ConfigService {
    config: AppConfig,
    config_path: PathBuf,
}

impl ConfigService {
    /// Read `config_path` if it exists, then apply environment overrides.
    /// An unreadable file falls back to defaults.
    pub fn load(config_path: &Path) -> Result<Self> {
        let config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_json::from_str::<AppConfig>(&content).unwrap_or_else(|e| {
                warn!(path = %config_path.display(), error = %e, "invalid config, using defaults");
                AppConfig::default()
            })
        } else {
            AppConfig::default()
        };

        let config = apply_env_overrides(config, |key| std::env::var(key).ok());

        info!(
            path = %config_path.display(),
            database = %config.database_path.display(),
            log_level = config.log_level.as_str(),
            "config loaded"
        );

        Ok(Self {
            config,
            config_path: config_path.to_path_buf(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.config.log_level
    }

    /// Change the log level and persist it. Takes effect on next start.
    pub fn set_log_level(&mut self, level: LogLevel) -> Result<()> {
        self.config.log_level = level;
        self.save()
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.config)?;
        std::fs::write(&self.config_path, content)?;

        info!(path = %self.config_path.display(), "config saved");
        Ok(())
    }
}

fn apply_env_overrides<F>(mut config: AppConfig, lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup(ENV_DATABASE_PATH).filter(|p| !p.trim().is_empty()) {
        config.database_path = PathBuf::from(path);
    }

    if let Some(raw) = lookup(ENV_LOG_LEVEL) {
        match LogLevel::parse(&raw) {
            Some(level) => config.log_level = level,
            None => warn!(value = %raw, "ignoring unknown {}", ENV_LOG_LEVEL),
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::from_u8(1), LogLevel::Error);
        assert_eq!(LogLevel::from_u8(3), LogLevel::Info);
        assert_eq!(LogLevel::from_u8(5), LogLevel::Trace);
        assert_eq!(LogLevel::from_u8(99), LogLevel::Info);
        assert_eq!(LogLevel::parse(" DEBUG "), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("loud"), None);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_DATABASE_PATH, "/tmp/override.db"),
            (ENV_LOG_LEVEL, "trace"),
        ]
        .into_iter()
        .collect();

        let config = apply_env_overrides(AppConfig::default(), |key| {
            env.get(key).map(|v| v.to_string())
        });

        assert_eq!(config.database_path, PathBuf::from("/tmp/override.db"));
        assert_eq!(config.log_level, LogLevel::Trace);
    }

    #[test]
    fn test_unknown_env_level_keeps_configured_level() {
        let config = apply_env_overrides(AppConfig::default(), |key| {
            (key == ENV_LOG_LEVEL).then(|| "shouting".to_string())
        });
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_database_options_from_config() {
        let config = AppConfig {
            db_max_connections: 0,
            db_query_timeout_ms: 1500,
            ..AppConfig::default()
        };
        let options = config.database_options();
        assert_eq!(options.max_connections, 1);
        assert_eq!(options.timeouts.db_query, Duration::from_millis(1500));
    }

    #[test]
    fn test_save_and_reload_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("app_config.json");

        let mut service = ConfigService::load(&path).unwrap();
        service.set_log_level(LogLevel::Debug).unwrap();
        assert!(path.exists());

        let reloaded = ConfigService::load(&path).unwrap();
        // An exported LOOPSTREAK_LOG_LEVEL would win over the file
        if std::env::var(ENV_LOG_LEVEL).is_err() {
            assert_eq!(reloaded.get_log_level(), LogLevel::Debug);
        }
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_config.json");
        std::fs::write(&path, r#"{ "db_max_connections": 2 }"#).unwrap();

        let service = ConfigService::load(&path).unwrap();
        assert_eq!(service.config().db_max_connections, 2);
        assert_eq!(service.config().db_query_timeout_ms, 10_000);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let service = ConfigService::load(&path).unwrap();
        assert_eq!(service.config().db_max_connections, 5);
    }
}
