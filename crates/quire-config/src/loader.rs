//! Configuration loader with multi-source merging

use crate::{ConfigError, Paths, QuireConfig};
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader with builder pattern
pub struct ConfigLoader {
    project_dir: PathBuf,
    env_prefix: String,
    explicit_file: Option<PathBuf>,
    include_user_config: bool,
}

impl ConfigLoader {
    /// Create a new config loader with default project directory (current dir)
    pub fn new() -> Self {
        Self {
            project_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            env_prefix: "QUIRE".to_string(),
            explicit_file: None,
            include_user_config: true,
        }
    }

    /// Set the project directory
    pub fn with_project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.project_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the environment variable prefix (default: "QUIRE")
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Merge an explicitly named file after the local config. The file must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.explicit_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Skip ~/.config/quire/config.toml
    pub fn without_user_config(mut self) -> Self {
        self.include_user_config = false;
        self
    }

    /// Load configuration from all sources with proper precedence
    pub fn load(self) -> Result<QuireConfig> {
        let mut builder = config::Config::builder();

        // 1. Start with built-in defaults
        let defaults = QuireConfig::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2. User config (~/.config/quire/config.toml)
        if self.include_user_config
            && let Ok(user_config_file) = Paths::new().user_config_file()
            && user_config_file.exists()
        {
            builder = builder.add_source(toml_file(user_config_file));
        }

        // 3. Project config (quire.toml)
        let project_config_file = Paths::project_config_file(&self.project_dir);
        if project_config_file.exists() {
            builder = builder.add_source(toml_file(project_config_file));
        }

        // 4. Local config (quire.local.toml, gitignored)
        let local_config_file = Paths::local_config_file(&self.project_dir);
        if local_config_file.exists() {
            builder = builder.add_source(toml_file(local_config_file));
        }

        // 5. Explicit --config file
        if let Some(path) = &self.explicit_file {
            if let Err(source) = std::fs::metadata(path) {
                return Err(ConfigError::ReadError {
                    path: path.clone(),
                    source,
                }
                .into());
            }
            builder = builder.add_source(toml_file(path.clone()).required(true));
        }

        // 6. Environment variables (QUIRE_*)
        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .separator("_")
                .try_parsing(true),
        );

        // Build and deserialize
        let config = builder.build().context("Failed to build configuration")?;

        let mut quire_config: QuireConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        // Resolve relative paths
        quire_config.resolve_paths(&self.project_dir);
        quire_config
            .validate()
            .context("Configuration failed validation")?;

        Ok(quire_config)
    }

    /// Load configuration or return defaults if not found
    pub fn load_or_default(self) -> QuireConfig {
        self.load().unwrap_or_default()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn toml_file(path: PathBuf) -> config::File<config::FileSourceFile, config::FileFormat> {
    config::File::from(path)
        .required(false)
        .format(config::FileFormat::Toml)
}
