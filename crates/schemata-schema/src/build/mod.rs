//! Module: build
//! Responsibility: turn a catalog into the process-wide registry, once.
//!
//! Invariants:
//! - The global registry is installed at most once per process.
//! - A failed build installs nothing; the next attempt starts clean.
//! - Nothing reads the global registry before it is installed.

#[cfg(test)]
mod tests;

use crate::{error::ErrorTree, node::Catalog, validate::validate_catalog};
use schemata_config::Config;
use schemata_core::registry::{Registry, RegistryError};
use std::sync::OnceLock;
use thiserror::Error as ThisError;

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error("catalog validation failed:\n{0}")]
    Validation(ErrorTree),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("type registry already initialized")]
    AlreadyInitialized,

    #[error("type registry not initialized")]
    NotInitialized,

    #[error("failed to read catalog '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog '{origin}': {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

///
/// REGISTRY
/// the frozen, process-wide registry
///

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Validate a catalog and freeze it into a registry without installing it.
pub fn build_registry(catalog: &Catalog) -> Result<Registry, BuildError> {
    validate_catalog(catalog).map_err(BuildError::Validation)?;

    build_unchecked(catalog)
}

// Registry construction only; uniqueness is still enforced by the builder.
fn build_unchecked(catalog: &Catalog) -> Result<Registry, BuildError> {
    let mut builder = Registry::builder();
    builder.register_all(catalog.to_models())?;

    Ok(builder.build())
}

/// Load every catalog file named by `config` and build a registry from them.
///
/// With `catalog.strict` off, only the registry's own uniqueness checks run.
pub fn load_registry(config: &Config) -> Result<Registry, BuildError> {
    let catalog = load_catalog(config)?;

    if config.catalog.strict {
        build_registry(&catalog)
    } else {
        tracing::warn!("catalog validation disabled; building registry unchecked");
        build_unchecked(&catalog)
    }
}

/// Load every catalog file named by `config`, relative to the config file.
pub fn load_catalog(config: &Config) -> Result<Catalog, BuildError> {
    Catalog::from_files(config.catalog_paths().as_slice())
}

/// Install `registry` as the process-wide registry.
pub fn install_registry(registry: Registry) -> Result<&'static Registry, BuildError> {
    let types = registry.len();
    REGISTRY
        .set(registry)
        .map_err(|_| BuildError::AlreadyInitialized)?;

    tracing::info!(types, "type registry installed");

    self::registry()
}

/// Validate, build and install the process-wide registry.
///
/// A second call fails with `AlreadyInitialized`, even if its catalog is
/// identical.
pub fn init_registry(catalog: &Catalog) -> Result<&'static Registry, BuildError> {
    if REGISTRY.get().is_some() {
        return Err(BuildError::AlreadyInitialized);
    }

    install_registry(build_registry(catalog)?)
}

/// The installed process-wide registry.
pub fn registry() -> Result<&'static Registry, BuildError> {
    REGISTRY.get().ok_or(BuildError::NotInitialized)
}
