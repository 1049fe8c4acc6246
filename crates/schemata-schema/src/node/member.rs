use crate::{
    err,
    error::ErrorTree,
    node::{AssociationKindDef, TypeDef},
    validate::naming,
};
use schemata_core::model::{AssociationModel, Cardinality, FieldModel, MemberId, ValueKind};
use serde::{Deserialize, Serialize};

///
/// ValueDef
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueDef {
    pub name: String,
    pub id: u64,
    pub since: u32,

    #[serde(rename = "type")]
    pub kind: ValueKind,
    pub cardinality: Cardinality,

    #[serde(rename = "final", default)]
    pub is_final: bool,

    #[serde(default)]
    pub encrypted: bool,
}

impl ValueDef {
    #[must_use]
    pub fn to_model(&self) -> FieldModel {
        FieldModel {
            name: self.name.clone(),
            id: MemberId(self.id),
            since: self.since,
            kind: self.kind,
            cardinality: self.cardinality,
            is_final: self.is_final,
            encrypted: self.encrypted,
        }
    }

    pub(crate) fn validate_in(&self, owner: &TypeDef) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = naming::validate_member_name(&self.name) {
            errs.add(e);
        }
        validate_since(&mut errs, self.since, owner);
        if self.cardinality == Cardinality::Any {
            err!(errs, "values cannot have cardinality Any");
        }

        errs.result()
    }
}

///
/// AssociationDef
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationDef {
    pub name: String,
    pub id: u64,
    pub since: u32,

    #[serde(rename = "type")]
    pub kind: AssociationKindDef,
    pub cardinality: Cardinality,
    pub ref_type: String,

    #[serde(rename = "final", default)]
    pub is_final: bool,
}

impl AssociationDef {
    #[must_use]
    pub fn to_model(&self) -> AssociationModel {
        AssociationModel {
            name: self.name.clone(),
            id: MemberId(self.id),
            since: self.since,
            kind: self.kind.into(),
            cardinality: self.cardinality,
            ref_type: self.ref_type.clone(),
            is_final: self.is_final,
        }
    }

    pub(crate) fn validate_in(&self, owner: &TypeDef) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = naming::validate_member_name(&self.name) {
            errs.add(e);
        }
        if let Err(e) = naming::validate_type_name(&self.ref_type) {
            err!(errs, "refType: {e}");
        }
        validate_since(&mut errs, self.since, owner);

        errs.result()
    }
}

// A member can neither predate its type nor postdate the catalog.
fn validate_since(errs: &mut ErrorTree, since: u32, owner: &TypeDef) {
    if since < owner.since {
        err!(errs, "since {since} precedes type since {}", owner.since);
    }
    if since > owner.version.get() {
        err!(errs, "since {since} is newer than catalog version {}", owner.version);
    }
}
