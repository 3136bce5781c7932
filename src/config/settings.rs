//! User settings for Aegis
//!
//! Stored as `config.json` in the base directory. A missing file means
//! defaults; nothing is written until `aegis init` or an explicit save.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::paths::AegisPaths;
use crate::error::AegisError;

/// How batch results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// CSV with an `id,status,output` header
    Csv,
}

/// User settings for Aegis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Where `--save` writes files; defaults to `<base>/exports`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,

    /// Worker threads for batch runs; all cores when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_parallelism: Option<usize>,

    /// Default batch output format
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            export_dir: None,
            batch_parallelism: None,
            output_format: OutputFormat::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &AegisPaths) -> Result<Self, AegisError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                AegisError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                AegisError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AegisPaths) -> Result<(), AegisError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            AegisError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| AegisError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject values that cannot work
    pub fn validate(&self) -> Result<(), AegisError> {
        if self.batch_parallelism == Some(0) {
            return Err(AegisError::Config(
                "batch_parallelism must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Resolved export directory
    pub fn export_dir(&self, paths: &AegisPaths) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| paths.default_export_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.output_format, OutputFormat::Table);
        assert!(settings.export_dir.is_none());
        assert!(settings.batch_parallelism.is_none());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AegisPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.output_format, OutputFormat::Table);
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AegisPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            batch_parallelism: Some(2),
            output_format: OutputFormat::Json,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.batch_parallelism, Some(2));
        assert_eq!(loaded.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_zero_parallelism_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AegisPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"batch_parallelism": 0}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, AegisError::Config(_)));
    }

    #[test]
    fn test_export_dir_resolution() {
        let paths = AegisPaths::with_base_dir(PathBuf::from("/base"));
        let mut settings = Settings::default();
        assert_eq!(settings.export_dir(&paths), PathBuf::from("/base/exports"));

        settings.export_dir = Some(PathBuf::from("/elsewhere"));
        assert_eq!(settings.export_dir(&paths), PathBuf::from("/elsewhere"));
    }
}
