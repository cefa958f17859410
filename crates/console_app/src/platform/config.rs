use std::fs;
use std::path::Path;
use std::time::Duration;

use console_core::TickerSettings;
use console_engine::BackendSettings;
use console_logging::{console_info, console_warn};
use serde::Deserialize;

use super::logging::LogDestination;

/// Settings read from `console.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub base_url: String,
    pub ocr_tick_ms: u64,
    pub chat_tick_ms: u64,
    pub connect_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub log_destination: LogDestination,
}

/// Where the loaded settings came from. Loading happens before the logger
/// exists, so the outcome is reported afterwards through [`ConfigOrigin::log`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File,
    Missing,
    Unreadable(String),
    Invalid(String),
}

impl ConfigOrigin {
    pub fn log(&self, path: &Path) {
        match self {
            ConfigOrigin::File => console_info!("Loaded config from {:?}", path),
            ConfigOrigin::Missing => console_info!("No config at {:?}; using defaults", path),
            ConfigOrigin::Unreadable(err) => {
                console_warn!("Failed to read config from {:?}: {}", path, err)
            }
            ConfigOrigin::Invalid(err) => {
                console_warn!("Failed to parse config from {:?}: {}", path, err)
            }
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        let backend = BackendSettings::default();
        let ticker = TickerSettings::default();
        Self {
            base_url: backend.base_url,
            ocr_tick_ms: ticker.ocr_interval.as_millis() as u64,
            chat_tick_ms: ticker.chat_interval.as_millis() as u64,
            connect_timeout_secs: backend.connect_timeout.as_secs(),
            max_response_bytes: backend.max_response_bytes,
            log_destination: LogDestination::default(),
        }
    }
}

impl ConsoleConfig {
    pub fn ticker_settings(&self) -> TickerSettings {
        TickerSettings {
            ocr_interval: Duration::from_millis(self.ocr_tick_ms),
            chat_interval: Duration::from_millis(self.chat_tick_ms),
        }
    }

    pub fn backend_settings(&self) -> BackendSettings {
        BackendSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            max_response_bytes: self.max_response_bytes,
        }
    }
}

/// Loads the config file, falling back to defaults when it is missing or broken.
pub fn load_config(path: &Path) -> (ConsoleConfig, ConfigOrigin) {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return (ConsoleConfig::default(), ConfigOrigin::Missing);
        }
        Err(err) => {
            return (
                ConsoleConfig::default(),
                ConfigOrigin::Unreadable(err.to_string()),
            );
        }
    };

    match ron::from_str(&content) {
        Ok(config) => (config, ConfigOrigin::File),
        Err(err) => (
            ConsoleConfig::default(),
            ConfigOrigin::Invalid(err.to_string()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("console.ron");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, origin) = load_config(&dir.path().join("absent.ron"));
        assert_eq!(origin, ConfigOrigin::Missing);
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.log_destination, LogDestination::File);
        assert_eq!(config.ocr_tick_ms, 1500);
        assert_eq!(config.chat_tick_ms, 1200);
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"(base_url: "http://demo.local:9000/", chat_tick_ms: 300)"#,
        );
        let (config, origin) = load_config(&path);
        assert_eq!(origin, ConfigOrigin::File);
        assert_eq!(config.base_url, "http://demo.local:9000/");
        assert_eq!(config.chat_tick_ms, 300);
        assert_eq!(config.ocr_tick_ms, 1500);
        assert_eq!(
            config.ticker_settings().chat_interval,
            Duration::from_millis(300)
        );
        assert_eq!(config.backend_settings().base_url, "http://demo.local:9000/");
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "(base_url: 12,");
        let (config, origin) = load_config(&path);
        assert_eq!(config, ConsoleConfig::default());
        assert!(matches!(origin, ConfigOrigin::Invalid(_)));
    }

    #[test]
    fn log_destination_is_read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "(log_destination: Both)");
        let (config, _) = load_config(&path);
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.ocr_tick_ms, 1500);
    }
}
