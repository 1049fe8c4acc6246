//! Generated-catalog definitions for Schemata: parsing, validation with
//! route-aware error trees, conversion into runtime models, and the
//! process-wide two-phase registry build.

pub mod build;
pub mod error;
pub mod node;
pub mod validate;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        build::{BuildError, build_registry, init_registry, registry},
        err,
        error::ErrorTree,
        node::{
            AssociationDef, AssociationKindDef, Catalog, CatalogVersion, TypeDef, TypeKindDef,
            ValidateNode, ValueDef,
        },
        validate::validate_catalog,
    };
}
