//! Path management for Aegis
//!
//! ## Path Resolution Order
//!
//! 1. `AEGIS_CLI_HOME` environment variable (if set)
//! 2. The platform config directory for `aegis`
//!    (`~/.config/aegis` on Linux, `~/Library/Application Support/xyz.GamicGo.aegis`
//!    on macOS, `%APPDATA%\GamicGo\aegis\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::AegisError;

/// Environment variable that overrides the base directory
pub const HOME_ENV: &str = "AEGIS_CLI_HOME";

/// Manages all paths used by Aegis
#[derive(Debug, Clone)]
pub struct AegisPaths {
    base_dir: PathBuf,
}

impl AegisPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, AegisError> {
        let base_dir = match std::env::var_os(HOME_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create AegisPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Default directory for exported text files
    pub fn default_export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), AegisError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| AegisError::Io(format!("Failed to create base directory: {}", e)))
    }

    /// Check if Aegis has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, AegisError> {
    ProjectDirs::from("xyz", "GamicGo", "aegis")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| AegisError::Config("Could not determine home directory".into()))
}
