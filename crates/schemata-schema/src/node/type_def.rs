use crate::{
    err,
    error::ErrorTree,
    node::{AssociationDef, CatalogVersion, TypeKindDef, ValidateNode, ValueDef},
    validate::{naming, system},
};
use schemata_core::{
    model::{LifecycleKind, StorageId, TypeModel},
    type_ref::TypeRef,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

///
/// TypeDef
///
/// One generated type object, exactly as the catalog generator writes it.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDef {
    pub name: String,
    pub since: u32,

    #[serde(rename = "type")]
    pub kind: TypeKindDef,
    pub id: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_id: Option<String>,

    #[serde(default)]
    pub versioned: bool,

    #[serde(default)]
    pub encrypted: bool,

    #[serde(default)]
    pub values: BTreeMap<String, ValueDef>,

    #[serde(default)]
    pub associations: BTreeMap<String, AssociationDef>,

    pub app: String,
    pub version: CatalogVersion,
}

impl TypeDef {
    #[must_use]
    pub fn type_ref(&self) -> TypeRef {
        TypeRef::new(self.app.clone(), self.name.clone())
    }

    #[must_use]
    pub fn lifecycle(&self) -> LifecycleKind {
        self.kind.into()
    }

    /// Convert into the runtime model. Members are keyed by their declared
    /// name; validation guarantees that matches the map key.
    #[must_use]
    pub fn to_model(&self) -> TypeModel {
        TypeModel {
            app: self.app.clone(),
            name: self.name.clone(),
            kind: self.lifecycle(),
            id: StorageId(self.id),
            root_id: self.root_id.clone(),
            since: self.since,
            versioned: self.versioned,
            encrypted: self.encrypted,
            values: self
                .values
                .values()
                .map(|value| (value.name.clone(), value.to_model()))
                .collect(),
            associations: self
                .associations
                .values()
                .map(|association| (association.name.clone(), association.to_model()))
                .collect(),
            version: self.version.get(),
        }
    }

    // Member identities share one namespace across fields and associations.
    fn validate_member_ids(&self, errs: &mut ErrorTree) {
        let mut seen = BTreeMap::<u64, &str>::new();
        let ids = self
            .values
            .values()
            .map(|v| (v.id, v.name.as_str()))
            .chain(self.associations.values().map(|a| (a.id, a.name.as_str())));

        for (id, name) in ids {
            if let Some(prev) = seen.insert(id, name) {
                err!(errs, "members '{prev}' and '{name}' share identity {id}");
            }
        }
    }

    fn validate_member_names(&self, errs: &mut ErrorTree) {
        let fields: BTreeSet<&str> = self.values.keys().map(String::as_str).collect();
        for name in self.associations.keys() {
            if fields.contains(name.as_str()) {
                err!(errs, "'{name}' is declared as both a value and an association");
            }
        }
    }

    fn validate_root(&self, errs: &mut ErrorTree) {
        match (self.lifecycle().has_storage_root(), &self.root_id) {
            (true, None) => err!(errs, "{} requires a rootId", self.kind),
            (true, Some(root)) if root.is_empty() => err!(errs, "rootId is empty"),
            (false, Some(root)) => err!(errs, "{} must not declare rootId '{root}'", self.kind),
            _ => {}
        }
    }

    fn validate_encryption(&self, errs: &mut ErrorTree) {
        if self.encrypted {
            return;
        }
        for value in self.values.values().filter(|v| v.encrypted) {
            err!(
                errs,
                "encrypted value '{}' on a type that is not encrypted",
                value.name
            );
        }
    }
}

impl ValidateNode for TypeDef {
    fn route_key(&self) -> String {
        self.type_ref().to_string()
    }

    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        // Phase 1: type-level shape.
        if let Err(e) = naming::validate_type_name(&self.name) {
            errs.add(e);
        }
        if let Err(e) = naming::validate_app_name(&self.app) {
            errs.add(e);
        }
        if self.version.get() < self.since {
            err!(
                errs,
                "catalog version {} predates type since {}",
                self.version,
                self.since
            );
        }
        self.validate_root(&mut errs);
        self.validate_encryption(&mut errs);
        system::validate_system_fields(self, &mut errs);

        // Phase 2: member identities and names across both maps.
        self.validate_member_ids(&mut errs);
        self.validate_member_names(&mut errs);

        // Phase 3: each member under its own route.
        for (key, value) in &self.values {
            let mut member_errs = value.validate_in(self).err().unwrap_or_default();
            if key != &value.name {
                err!(member_errs, "keyed as '{key}' but named '{}'", value.name);
            }
            errs.merge_for(key.clone(), member_errs);
        }
        for (key, association) in &self.associations {
            let mut member_errs = association.validate_in(self).err().unwrap_or_default();
            if key != &association.name {
                err!(member_errs, "keyed as '{key}' but named '{}'", association.name);
            }
            errs.merge_for(key.clone(), member_errs);
        }

        errs.result()
    }
}
