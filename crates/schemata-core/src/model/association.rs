use crate::{
    model::{Cardinality, LinkKind, MemberId},
    type_ref::TypeRef,
};
use serde::Serialize;

///
/// AssociationModel
///
/// Runtime descriptor of one structural link to another type.
/// The target is held by name only and resolved lazily through the registry,
/// so type models that point at each other never form ownership cycles.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AssociationModel {
    pub name: String,
    pub id: MemberId,
    pub since: u32,
    pub kind: LinkKind,
    pub cardinality: Cardinality,
    /// Target type name inside the owning type's application.
    pub ref_type: String,
    pub is_final: bool,
}

impl AssociationModel {
    /// Reference to the target type, resolved in the owner's application.
    #[must_use]
    pub fn target(&self, app: &str) -> TypeRef {
        TypeRef::new(app.to_string(), self.ref_type.clone())
    }

    #[must_use]
    pub const fn is_aggregation(&self) -> bool {
        self.kind.is_owning()
    }
}
