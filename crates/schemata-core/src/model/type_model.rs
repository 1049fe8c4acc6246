use crate::{
    model::{
        AssociationModel, Cardinality, FieldModel, LifecycleKind, MemberId, StorageId, SystemField,
    },
    type_ref::TypeRef,
};
use serde::Serialize;
use std::collections::{BTreeMap, btree_map::Entry};

///
/// TypeModel
///
/// Runtime model for one entity type, built once from the catalog and
/// immutable for the rest of the process.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TypeModel {
    /// Application namespace owning the type.
    pub app: String,
    /// Type name, unique within `app`.
    pub name: String,
    pub kind: LifecycleKind,
    /// Wire/storage discriminator.
    pub id: StorageId,
    /// Storage root; absent for aggregated types.
    pub root_id: Option<String>,
    /// Catalog version at which the type first existed.
    pub since: u32,
    /// Stored instances carry their own version tag.
    pub versioned: bool,
    /// Encryption-at-rest posture of the whole record.
    pub encrypted: bool,
    pub values: BTreeMap<String, FieldModel>,
    pub associations: BTreeMap<String, AssociationModel>,
    /// Catalog version this snapshot was generated against.
    pub version: u32,
}

impl TypeModel {
    #[must_use]
    pub fn type_ref(&self) -> TypeRef {
        TypeRef::new(self.app.clone(), self.name.clone())
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.values.get(name)
    }

    #[must_use]
    pub fn association(&self, name: &str) -> Option<&AssociationModel> {
        self.associations.get(name)
    }

    #[must_use]
    pub fn system_field(&self, field: SystemField) -> Option<&FieldModel> {
        self.field(field.name())
    }

    /// Look up a field or association by name.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<MemberModel<'_>> {
        self.field(name)
            .map(MemberModel::Field)
            .or_else(|| self.association(name).map(MemberModel::Association))
    }

    /// Look up a field or association by wire identity.
    #[must_use]
    pub fn member_by_id(&self, id: MemberId) -> Option<MemberModel<'_>> {
        self.members().find(|member| member.id() == id)
    }

    /// All fields followed by all associations, each group in name order.
    pub fn members(&self) -> impl Iterator<Item = MemberModel<'_>> {
        self.values
            .values()
            .map(MemberModel::Field)
            .chain(self.associations.values().map(MemberModel::Association))
    }

    /// Fields the cipher layer must encrypt.
    pub fn encrypted_fields(&self) -> impl Iterator<Item = &FieldModel> {
        self.values.values().filter(|field| field.encrypted)
    }

    /// Whether instances need a session key before they can be stored.
    #[must_use]
    pub const fn requires_session_key(&self) -> bool {
        self.encrypted
    }

    /// Pairs of members sharing one wire identity, as `(id, first, second)`.
    #[must_use]
    pub fn identity_collisions(&self) -> Vec<(MemberId, String, String)> {
        let mut seen = BTreeMap::<MemberId, &str>::new();
        let mut collisions = Vec::new();

        for member in self.members() {
            match seen.entry(member.id()) {
                Entry::Vacant(slot) => {
                    slot.insert(member.name());
                }
                Entry::Occupied(slot) => collisions.push((
                    member.id(),
                    (*slot.get()).to_string(),
                    member.name().to_string(),
                )),
            }
        }

        collisions
    }
}

///
/// MemberModel
///
/// Borrowed view over either kind of member; both share the identity and
/// version rules.
///

#[derive(Clone, Copy, Debug)]
pub enum MemberModel<'a> {
    Field(&'a FieldModel),
    Association(&'a AssociationModel),
}

impl<'a> MemberModel<'a> {
    #[must_use]
    pub const fn name(self) -> &'a str {
        match self {
            Self::Field(field) => field.name.as_str(),
            Self::Association(association) => association.name.as_str(),
        }
    }

    #[must_use]
    pub const fn id(self) -> MemberId {
        match self {
            Self::Field(field) => field.id,
            Self::Association(association) => association.id,
        }
    }

    #[must_use]
    pub const fn since(self) -> u32 {
        match self {
            Self::Field(field) => field.since,
            Self::Association(association) => association.since,
        }
    }

    #[must_use]
    pub const fn cardinality(self) -> Cardinality {
        match self {
            Self::Field(field) => field.cardinality,
            Self::Association(association) => association.cardinality,
        }
    }

    #[must_use]
    pub const fn is_final(self) -> bool {
        match self {
            Self::Field(field) => field.is_final,
            Self::Association(association) => association.is_final,
        }
    }
}
