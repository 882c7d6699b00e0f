//! Configuration module for the photo sync tool
//!
//! Supports loading configuration from a TOML file.
//! Configuration is looked up in this order:
//! - `./mtp_photo_sync.toml` (current directory)
//! - Windows: %APPDATA%\mtp_photo_sync\config.toml
//! - Linux: ~/.config/mtp_photo_sync/config.toml

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application name used for config directory
const APP_NAME: &str = "mtp_photo_sync";

/// Default config file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Config file name checked in the current directory
const LOCAL_CONFIG_FILE_NAME: &str = "mtp_photo_sync.toml";

/// Get the standard configuration directory for the application.
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME))
}

/// Get the standard configuration file path.
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Device discovery settings
    pub device: DeviceConfig,

    /// Sync settings
    pub sync: SyncConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Device discovery settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Substring that identifies the device's display name in the namespace
    pub vendor_marker: String,

    /// Path components from the device item down to the photo storage
    pub photo_subpath: Vec<String>,

    /// Directory searched for mounted devices on platforms without a
    /// shell namespace (defaults to `$XDG_RUNTIME_DIR/gvfs`)
    pub namespace_root: Option<PathBuf>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            vendor_marker: "Apple iPhone".to_string(),
            photo_subpath: vec!["Internal Storage".to_string(), "DCIM".to_string()],
            namespace_root: None,
        }
    }
}

impl DeviceConfig {
    /// The namespace directory to search on non-Windows platforms
    pub fn effective_namespace_root(&self) -> Option<PathBuf> {
        self.namespace_root
            .clone()
            .or_else(|| dirs::runtime_dir().map(|dir| dir.join("gvfs")))
    }
}

/// Sync settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// File extensions to mirror (case-insensitive, leading dot optional)
    pub file_types: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            file_types: vec![".jpg".to_string(), ".png".to_string(), ".mov".to_string()],
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Whether to also write the log to a file
    pub log_to_file: bool,

    /// Log file path (opened in append mode)
    pub log_file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_to_file: true,
            log_file: PathBuf::from("sync.log"),
        }
    }
}

/// Normalize a list of extensions into a lowercase, dot-prefixed set.
///
/// `"JPG"`, `"jpg"` and `".jpg"` all become `".jpg"`. Empty entries are dropped.
pub fn normalize_file_types<S: AsRef<str>>(types: &[S]) -> BTreeSet<String> {
    types
        .iter()
        .map(|t| t.as_ref().trim().trim_start_matches('.').to_lowercase())
        .filter(|t| !t.is_empty())
        .map(|t| format!(".{}", t))
        .collect()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e.to_string()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))
    }

    /// Load configuration from default locations
    ///
    /// If no config file is found, returns default configuration.
    pub fn load_default() -> Result<Self, ConfigError> {
        let local_path = PathBuf::from(LOCAL_CONFIG_FILE_NAME);
        if local_path.exists() {
            return Self::load(&local_path);
        }

        if let Some(config_path) = get_config_path() {
            if config_path.exists() {
                return Self::load(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Write a commented default config file, creating parent directories
    pub fn write_default<P: AsRef<Path>>(path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::WriteError(parent.to_path_buf(), e.to_string()))?;
        }

        fs::write(path, Self::generate_default_config())
            .map_err(|e| ConfigError::WriteError(path.to_path_buf(), e.to_string()))
    }

    /// Generate a default config file with comments
    pub fn generate_default_config() -> String {
        include_str!("../../config.example.toml").to_string()
    }
}

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file was not found at the specified path
    #[error("Configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Failed to read the configuration file
    #[error("Failed to read config file '{}': {}", .0.display(), .1)]
    ReadError(PathBuf, String),

    /// Failed to parse the configuration file (invalid TOML)
    #[error("Failed to parse config file '{}': {}", .0.display(), .1)]
    ParseError(PathBuf, String),

    /// Failed to serialize configuration to TOML
    #[error("Failed to serialize configuration: {0}")]
    SerializeError(String),

    /// Failed to write configuration file
    #[error("Failed to write config file '{}': {}", .0.display(), .1)]
    WriteError(PathBuf, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.device.vendor_marker, "Apple iPhone");
        assert_eq!(config.device.photo_subpath, vec!["Internal Storage", "DCIM"]);
        assert_eq!(config.sync.file_types, vec![".jpg", ".png", ".mov"]);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.log_to_file);
        assert_eq!(config.logging.log_file, PathBuf::from("sync.log"));
    }

    #[test]
    fn test_normalize_file_types() {
        let set = normalize_file_types(&["JPG", ".png", " .MOV ", "", "."]);
        let expected: Vec<&str> = vec![".jpg", ".mov", ".png"];
        assert_eq!(set.iter().map(String::as_str).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_load_partial_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[device]
vendor_marker = "Pixel"

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.device.vendor_marker, "Pixel");
        // Unspecified fields keep their defaults
        assert_eq!(config.device.photo_subpath, vec!["Internal Storage", "DCIM"]);
        assert_eq!(config.sync.file_types.len(), 3);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[device\nvendor_marker = ").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_, _)));
    }

    #[test]
    fn test_generated_default_config_parses() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        Config::write_default(&path).unwrap();

        let config = Config::load(&path).unwrap();
        let defaults = Config::default();
        assert_eq!(config.device.vendor_marker, defaults.device.vendor_marker);
        assert_eq!(config.sync.file_types, defaults.sync.file_types);
        assert_eq!(config.logging.log_file, defaults.logging.log_file);
    }

    #[test]
    fn test_to_toml_round_trips_marker() {
        let mut config = Config::default();
        config.device.vendor_marker = "Galaxy".to_string();
        let text = config.to_toml().unwrap();
        assert!(text.contains("vendor_marker = \"Galaxy\""));
    }

    #[test]
    fn test_effective_namespace_root_prefers_config() {
        let mut config = DeviceConfig::default();
        config.namespace_root = Some(PathBuf::from("/mnt/phones"));
        assert_eq!(
            config.effective_namespace_root(),
            Some(PathBuf::from("/mnt/phones"))
        );
    }
}
