//! Configuration management for Quire
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. CLI arguments (highest precedence)
//! 2. Environment variables (QUIRE_* prefix)
//! 3. quire.local.toml (gitignored, local overrides)
//! 4. quire.toml (git-tracked, project config)
//! 5. ~/.config/quire/config.toml (user defaults)
//! 6. Built-in defaults (lowest precedence)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::Paths;

/// Main Quire configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuireConfig {
    pub logging: LoggingConfig,
    pub catalog: CatalogConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Seed file loaded when a command does not name one.
    pub seed: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl QuireConfig {
    /// Resolve relative paths to absolute paths based on project directory
    pub fn resolve_paths(&mut self, project_dir: &Path) {
        if let Some(seed) = &self.catalog.seed
            && seed.is_relative()
        {
            self.catalog.seed = Some(project_dir.join(seed));
        }
    }

    /// Checks values that deserialize but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.level must not be empty".to_string(),
            ));
        }
        if let Some(seed) = &self.catalog.seed
            && !seed.is_file()
        {
            return Err(ConfigError::ValidationError(format!(
                "catalog.seed does not point to a file: {}",
                seed.display()
            )));
        }
        Ok(())
    }

    /// Render as TOML, for `config show`.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::MergeError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = QuireConfig::default();

        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert_eq!(config.catalog.seed, None);
        assert_eq!(config.output.format, OutputFormat::Table);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: QuireConfig = toml::from_str(
            r#"
[output]
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_resolve_relative_seed() {
        let mut config = QuireConfig::default();
        config.catalog.seed = Some(PathBuf::from("seed.toml"));

        config.resolve_paths(Path::new("/srv/library"));

        assert_eq!(config.catalog.seed, Some(PathBuf::from("/srv/library/seed.toml")));
    }

    #[test]
    fn test_validate_missing_seed() {
        let mut config = QuireConfig::default();
        config.catalog.seed = Some(PathBuf::from("/definitely/not/here.toml"));

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(msg)) if msg.contains("catalog.seed")
        ));
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config = QuireConfig::default();
        let rendered = config.to_toml().unwrap();

        assert!(rendered.contains("[logging]"));
        assert_eq!(toml::from_str::<QuireConfig>(&rendered).unwrap(), config);
    }
}
