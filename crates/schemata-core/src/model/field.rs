use crate::model::{Cardinality, MemberId, ValueKind};
use serde::Serialize;

///
/// FieldModel
/// Runtime descriptor of one scalar attribute.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FieldModel {
    pub name: String,
    /// Wire identity; stable once assigned and never reused.
    pub id: MemberId,
    /// Catalog version at which the field first existed.
    pub since: u32,
    pub kind: ValueKind,
    pub cardinality: Cardinality,
    /// Immutable once populated.
    pub is_final: bool,
    /// The value must be encrypted by the cipher layer before it leaves the process.
    pub encrypted: bool,
}

impl FieldModel {
    #[must_use]
    pub fn system_field(&self) -> Option<SystemField> {
        SystemField::from_name(&self.name)
    }

    /// Whether a null value stands for a slot reserved for the storage
    /// collaborator rather than for an absent value.
    #[must_use]
    pub fn is_reserved_slot(&self) -> bool {
        self.system_field().is_some_and(SystemField::is_reserved_slot)
    }
}

///
/// SystemField
///
/// Implicit fields layered under the same identity rules as user fields.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SystemField {
    Id,
    OwnerGroup,
    Permissions,
    Format,
}

impl SystemField {
    pub const ALL: [Self; 4] = [Self::Id, Self::OwnerGroup, Self::Permissions, Self::Format];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Id => "_id",
            Self::OwnerGroup => "_ownerGroup",
            Self::Permissions => "_permissions",
            Self::Format => "_format",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Identity and permission slots are filled by the storage collaborator
    /// and may therefore stay null on a freshly created instance.
    #[must_use]
    pub const fn is_reserved_slot(self) -> bool {
        matches!(self, Self::Id | Self::Permissions)
    }

    /// Fields every non-aggregated type must declare.
    #[must_use]
    pub const fn is_required_for_storage(self) -> bool {
        !matches!(self, Self::Format)
    }
}
