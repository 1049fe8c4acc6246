//! Module: node
//! Responsibility: the generated catalog format and its conversion into
//! runtime type models.
//!
//! Nodes mirror the generator's JSON one-to-one. They are validated as a
//! whole catalog before any runtime model is built from them.

mod kind;
mod member;
mod type_def;


use crate::{build::BuildError, error::ErrorTree};
use schemata_core::{model::TypeModel, type_ref::TypeRef};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};

// re-exports
pub use kind::{AssociationKindDef, CatalogVersion, TypeKindDef};
pub use member::{AssociationDef, ValueDef};
pub use type_def::TypeDef;

///
/// ValidateNode
///
/// Local, single-node validation. Catalog-wide rules live in `validate`.
///

pub trait ValidateNode {
    /// Route segment this node's errors are reported under.
    fn route_key(&self) -> String;

    fn validate(&self) -> Result<(), ErrorTree> {
        Ok(())
    }
}

///
/// CatalogFile
///
/// Accepted top-level shapes of one catalog file.
///

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Many(Vec<TypeDef>),
    One(Box<TypeDef>),
    Named(BTreeMap<String, TypeDef>),
}

///
/// Catalog
///
/// Ordered collection of type definitions, possibly spanning several apps
/// and several source files.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    types: Vec<TypeDef>,
}

impl Catalog {
    #[must_use]
    pub const fn new() -> Self {
        Self { types: Vec::new() }
    }

    #[must_use]
    pub const fn from_defs(types: Vec<TypeDef>) -> Self {
        Self { types }
    }

    /// Parse one catalog document: an array of type objects, a single type
    /// object, or an object keyed by type name.
    pub fn from_json_str(json: &str) -> Result<Self, BuildError> {
        Self::parse(json, "<inline>")
    }

    /// Load and merge several catalog files, in order.
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self, BuildError> {
        let mut catalog = Self::new();
        for path in paths {
            let path = path.as_ref();
            let json = fs::read_to_string(path).map_err(|source| BuildError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let file = Self::parse(&json, &path.display().to_string())?;

            tracing::debug!(path = %path.display(), types = file.len(), "catalog file loaded");
            catalog.merge(file);
        }

        Ok(catalog)
    }

    fn parse(json: &str, origin: &str) -> Result<Self, BuildError> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|source| BuildError::Parse {
                origin: origin.to_string(),
                source,
            })?;

        let types = match file {
            CatalogFile::Many(types) => types,
            CatalogFile::One(def) => vec![*def],
            CatalogFile::Named(map) => map.into_values().collect(),
        };

        Ok(Self { types })
    }

    /// Append every definition of `other`. Conflicts surface at validation.
    pub fn merge(&mut self, other: Self) {
        self.types.extend(other.types);
    }

    pub fn push(&mut self, def: TypeDef) {
        self.types.push(def);
    }

    #[must_use]
    pub fn types(&self) -> &[TypeDef] {
        &self.types
    }

    #[must_use]
    pub fn get(&self, type_ref: &TypeRef) -> Option<&TypeDef> {
        self.types
            .iter()
            .find(|def| def.app == type_ref.app() && def.name == type_ref.name())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    #[must_use]
    pub fn to_models(&self) -> Vec<TypeModel> {
        self.types.iter().map(TypeDef::to_model).collect()
    }

    #[must_use]
    pub fn into_models(self) -> Vec<TypeModel> {
        self.to_models()
    }
}

impl FromIterator<TypeDef> for Catalog {
    fn from_iter<I: IntoIterator<Item = TypeDef>>(iter: I) -> Self {
        Self::from_defs(iter.into_iter().collect())
    }
}
