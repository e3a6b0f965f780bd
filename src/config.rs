//! Configuration loading and merging.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::flags::{Platform, SplatOptions};

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Quoting convention for `join`. Detected from the build target if unset.
    pub platform: Option<Platform>,

    /// Default options for `splat`.
    pub splat: SplatOptions,
}

impl Config {
    /// Load configuration, merging user and project configs.
    pub fn load(cwd: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // ~/.config/cmdflags.toml
        if let Some(user_config) = Self::load_user_config()? {
            config = user_config;
        }

        // .cmdflags.toml in cwd
        if let Some(cwd) = cwd
            && let Some(project_config) = Self::load_project_config(cwd)?
        {
            config.merge(project_config);
        }

        Ok(config)
    }

    fn load_user_config() -> Result<Option<Self>, ConfigError> {
        match Self::user_config_path() {
            Some(path) => Self::read(&path),
            None => Ok(None),
        }
    }

    fn load_project_config(cwd: &Path) -> Result<Option<Self>, ConfigError> {
        Self::read(&cwd.join(".cmdflags.toml"))
    }

    fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        log::debug!("loading config from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(config))
    }

    /// Get user config path.
    /// Respects CMDFLAGS_CONFIG env var for testing.
    fn user_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("CMDFLAGS_CONFIG") {
            return Some(PathBuf::from(path));
        }
        dirs::home_dir().map(|h| h.join(".config/cmdflags.toml"))
    }

    /// Merge another config into this one (other takes precedence).
    fn merge(&mut self, other: Config) {
        if other.platform.is_some() {
            self.platform = other.platform;
        }

        // Override scalars, then extend lists and alias maps
        let mut splat = self.splat.merge(&other.splat);
        splat.includes = extend(self.splat.includes.take(), other.splat.includes);
        splat.excludes = extend(self.splat.excludes.take(), other.splat.excludes);
        splat.argument_names = extend(
            self.splat.argument_names.take(),
            other.splat.argument_names,
        );
        splat.aliases = extend(self.splat.aliases.take(), other.splat.aliases);
        self.splat = splat;
    }

    /// The configured platform, or the build target's.
    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::current)
    }
}

fn extend<C>(base: Option<C>, other: Option<C>) -> Option<C>
where
    C: IntoIterator + Extend<<C as IntoIterator>::Item>,
{
    match (base, other) {
        (Some(mut base), Some(other)) => {
            base.extend(other);
            Some(base)
        }
        (base, other) => other.or(base),
    }
}
