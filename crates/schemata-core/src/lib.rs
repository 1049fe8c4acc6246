//! Core runtime for Schemata: type models, type references, the frozen
//! registry, instance values, the entity factory, the version-compatibility
//! resolver and the identity-addressed wire contract.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod entity;
pub mod error;
pub mod external;
pub mod model;
pub mod registry;
pub mod type_ref;
pub mod value;
pub mod version;
pub mod wire;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Maximum length for type names and application namespaces.
pub const MAX_TYPE_NAME_LEN: usize = 64;

/// Maximum length for field and association names.
pub const MAX_MEMBER_NAME_LEN: usize = 64;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, registries, factories, or codecs are re-exported here.
///

pub mod prelude {
    pub use crate::{
        entity::{Entity, Overrides},
        model::{
            AssociationModel, Cardinality, FieldModel, LifecycleKind, LinkKind, MemberId,
            StorageId, SystemField, TypeModel, ValueKind,
        },
        type_ref::TypeRef,
        value::{Date, Id, Reference, Value},
        version::FieldPresence,
    };
}
