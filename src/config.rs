//! Configuration file loading.
//!
//! The config only influences where fonts are looked up. Text, canvas size,
//! colors and the output path are fixed in [`crate::logo::LogoSpec`].

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::LogoError;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Font discovery settings.
    #[serde(default)]
    pub fonts: FontsConfig,
}

/// Font discovery settings.
#[derive(Debug, Deserialize)]
pub struct FontsConfig {
    /// Extra directories searched before the platform font directories.
    #[serde(default)]
    pub dirs: Vec<PathBuf>,

    /// Whether the platform font directories are searched at all.
    #[serde(default = "default_true")]
    pub system: bool,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self { dirs: Vec::new(), system: true }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, LogoError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| {
            LogoError::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        toml::from_str(&contents).map_err(|e| {
            LogoError::Config(format!("Failed to parse config {}: {e}", path.display()))
        })
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `LOGOGEN_CONFIG` environment variable
/// 3. `~/.config/logogen/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("LOGOGEN_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/logogen/config.toml")
    } else {
        PathBuf::from("logogen.toml")
    }
}
