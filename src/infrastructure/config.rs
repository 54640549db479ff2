use crate::constants::{APP_DIR_NAME, DB_FILE_NAME, DEFAULT_PAGE_SIZE, FALLBACK_DB_PATH};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// TOML configuration for langlearner
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub paging: PagingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PagingConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: i64,
}

// Default value functions
fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(DB_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DB_PATH))
}
fn default_page_size() -> i64 { DEFAULT_PAGE_SIZE }

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Create default configuration file at path
    pub fn create_default(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.paging.default_page_size < 1 {
            bail!(
                "paging.default_page_size must be at least 1, got {}",
                self.paging.default_page_size
            );
        }
        if self.database.path.as_os_str().is_empty() {
            bail!("database.path must not be empty");
        }
        Ok(())
    }
}
