//! ## Crate layout
//! - `core`: runtime type models, registry, values, entity factory, version
//!   resolver and wire contract.
//! - `schema`: generated-catalog format, validation and the global registry.
//! - `config`: `schemata.toml` loading.
//! - `error`: the public error surface.
//!
//! The `prelude` module carries the vocabulary most callers need.

pub use schemata_config as config;
pub use schemata_core as core;
pub use schemata_schema as schema;

pub mod error;
mod runtime;


use schemata_config::Config;
use schemata_core::registry::Registry;

// re-exports
pub use error::Error;
pub use runtime::Schemata;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Load, validate and freeze the catalog named by `config`.
pub fn load_registry(config: &Config) -> Result<Registry, Error> {
    Ok(schemata_schema::build::load_registry(config)?)
}

/// Load the catalog named by `config` and install it process-wide.
pub fn init(config: &Config) -> Result<Schemata<'static>, Error> {
    let registry = load_registry(config)?;
    schemata_schema::build::install_registry(registry)?;

    Schemata::global()
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Schemata,
        core::{
            entity::{Entity, Overrides},
            external::{LocalIds, ReservedSlots, SystemFieldProvider},
            model::{Cardinality, LifecycleKind, LinkKind, TypeModel, ValueKind},
            type_ref::TypeRef,
            value::{Date, Id, Reference, Value},
            version::FieldPresence,
            wire::WireRecord,
        },
        error::{Error, ErrorKind},
        schema::node::Catalog,
    };
}
