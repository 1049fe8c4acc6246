//! Runtime data model definitions.
//!
//! This module contains the *runtime representations* of catalog-level
//! concepts, as opposed to their generated, serialized form. Types in `model`
//! are built once from the catalog, frozen in the registry, and read by the
//! entity factory, the version resolver and the wire codec.
//!
//! In general:
//! - the catalog defines *what exists*
//! - `model` defines *what runs*

mod association;
mod field;
mod id;
mod kind;
mod type_model;

#[cfg(test)]
mod tests;

pub use association::AssociationModel;
pub use field::{FieldModel, SystemField};
pub use id::{MemberId, StorageId};
pub use kind::{Cardinality, LifecycleKind, LinkKind, ValueKind};
pub use type_model::{MemberModel, TypeModel};
