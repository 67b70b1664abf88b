//! `recordx.toml` loading
//!
//! ```toml
//! [storage]
//! backend = "json"        # or "sqlite"
//! data_dir = "data"
//!
//! [logging]
//! profile = "off"         # "development" | "production"
//!
//! [engine]
//! answer_policy = "strict"
//! command_log_capacity = 100
//! similarity_threshold = 0.6
//! redo_invalidation = "always"
//! ```

use std::path::{Path, PathBuf};

use recordx_core::logging_facility::Profile;
use recordx_engine::EngineConfig;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "recordx.toml";
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Json,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub backend: Backend,
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

/// Log output; `off` keeps the REPL output clean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogProfile {
    #[default]
    Off,
    Development,
    Production,
}

impl LogProfile {
    pub fn profile(self) -> Option<Profile> {
        match self {
            LogProfile::Off => None,
            LogProfile::Development => Some(Profile::Development),
            LogProfile::Production => Some(Profile::Production),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub profile: LogProfile,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub engine: EngineConfig,
}

impl CliConfig {
    /// Read the config file
    ///
    /// An explicit path must exist. Without one, `recordx.toml` in the working
    /// directory is used when present and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path)
            .map_err(|e| format!("cannot read config {}: {}", path.display(), e))?;
        let config = Self::parse(&text)
            .map_err(|e| format!("invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = toml::from_str(text)?;
        config.engine.validate()?;
        Ok(config)
    }
}
