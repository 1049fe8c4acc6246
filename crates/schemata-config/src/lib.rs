//! `schemata.toml` configuration: where the generated catalog lives, how
//! strictly it is checked, and the default log filter.

use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

/// File name looked up when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "schemata.toml";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{origin}': {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

///
/// Config
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub log: LogConfig,

    /// Directory relative catalog paths resolve against; the config file's
    /// own directory when loaded from disk.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Config {
    /// Parse configuration text; missing sections and keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Self::parse(text, "<inline>")
    }

    /// Load configuration from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut config = Self::parse(&text, &path.display().to_string())?;
        config.base_dir = path.parent().map(Path::to_path_buf);

        tracing::debug!(path = %path.display(), "config loaded");

        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        tracing::debug!(path = %path.display(), "config not found, using defaults");
        Ok(Self::default())
    }

    fn parse(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.paths.iter().any(|p| p.as_os_str().is_empty()) {
            return Err(ConfigError::Invalid("catalog.paths contains an empty path".to_string()));
        }
        if self.log.level.trim().is_empty() {
            return Err(ConfigError::Invalid("log.level is empty".to_string()));
        }

        Ok(())
    }

    /// Catalog paths, with relative entries resolved against `base_dir`.
    #[must_use]
    pub fn catalog_paths(&self) -> Vec<PathBuf> {
        self.catalog
            .paths
            .iter()
            .map(|path| match &self.base_dir {
                Some(base) if path.is_relative() => base.join(path),
                _ => path.clone(),
            })
            .collect()
    }
}

///
/// CatalogConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub paths: Vec<PathBuf>,

    /// Run full catalog validation before building the registry.
    pub strict: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            paths: vec![PathBuf::from("catalog/sys.json")],
            strict: true,
        }
    }
}

///
/// LogConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
