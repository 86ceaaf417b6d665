use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default storage quota in megabytes
pub const DEFAULT_STORAGE_LIMIT_MB: u64 = 200;

/// Default notification lifetime in ticks (two seconds at 60 ticks per second)
pub const DEFAULT_NOTIFICATION_TTL: u32 = 120;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Config {
    /// Local paths configuration
    pub paths: PathsConfig,

    /// Storage quota configuration
    pub storage: StorageConfig,

    /// Notification configuration
    pub notifications: NotificationConfig,
}

/// Local paths configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PathsConfig {
    /// Directory scanned for game manifests
    pub games_dir: PathBuf,

    /// JSON file holding the installed game ids
    pub state_file: PathBuf,
}

/// Storage quota configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StorageConfig {
    /// Maximum total size of installed games, in megabytes
    pub limit_mb: u64,
}

/// Notification configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct NotificationConfig {
    /// Number of ticks a notification stays visible
    pub ttl_ticks: u32,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("multigames");

        Self {
            paths: PathsConfig {
                games_dir: data_dir.join("games"),
                state_file: data_dir.join("installed.json"),
            },
            storage: StorageConfig {
                limit_mb: DEFAULT_STORAGE_LIMIT_MB,
            },
            notifications: NotificationConfig {
                ttl_ticks: DEFAULT_NOTIFICATION_TTL,
            },
        }
    }
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("multigames")
            .join("config.toml")
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from file
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Configuration file not found, using defaults");
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        info!("Configuration loaded from {}", config_path.display());
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let config_str = toml::to_string(self)?;
        fs::write(config_path, config_str)?;

        info!("Configuration saved to {}", config_path.display());
        Ok(())
    }

    /// Ensure all configured directories exist
    pub fn ensure_directories(&self) -> Result<()> {
        let state_dir = self.paths.state_file.parent();

        for dir in [Some(self.paths.games_dir.as_path()), state_dir].into_iter().flatten() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                info!("Creating directory: {}", dir.display());
                fs::create_dir_all(dir)?;
            }
        }

        Ok(())
    }
}
