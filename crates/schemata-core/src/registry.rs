//! Module: registry
//! Responsibility: the process-lifetime map from `TypeRef` to `TypeModel`.
//!
//! The registry has exactly two phases. `RegistryBuilder` is the single
//! threaded build phase and rejects conflicting definitions. `Registry` is the
//! frozen serve phase: it has no mutating API, is `Send + Sync`, and every
//! lookup is a plain hash-map read.

use crate::{
    error::{ErrorClass, ErrorDetail, ErrorOrigin, InternalError},
    model::{AssociationModel, MemberId, MemberModel, StorageId, TypeModel},
    type_ref::TypeRef,
};
use sha2::{Digest, Sha256};
use std::{
    collections::HashMap,
    fmt::{self, Display},
    sync::Arc,
};
use thiserror::Error as ThisError;

///
/// RegistryError
///

#[derive(Debug, ThisError)]
pub enum RegistryError {
    #[error("type '{0}' already registered")]
    DuplicateType(TypeRef),

    #[error("storage id {id} of '{incoming}' already used by '{existing}'")]
    IdentityCollision {
        id: StorageId,
        existing: TypeRef,
        incoming: TypeRef,
    },

    #[error("type '{type_ref}': members '{first}' and '{second}' share identity {id}")]
    MemberIdentityCollision {
        type_ref: TypeRef,
        id: MemberId,
        first: String,
        second: String,
    },

    #[error("type '{0}' not found")]
    UnknownType(TypeRef),

    #[error("no type with storage id {id} in app '{app}'")]
    UnknownStorageId { app: String, id: StorageId },

    #[error("type '{type_ref}' has no association '{name}'")]
    UnknownAssociation { type_ref: TypeRef, name: String },
}

impl RegistryError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::DuplicateType(_)
            | Self::IdentityCollision { .. }
            | Self::MemberIdentityCollision { .. } => ErrorClass::InvariantViolation,
            Self::UnknownType(_) | Self::UnknownStorageId { .. } | Self::UnknownAssociation { .. } => {
                ErrorClass::NotFound
            }
        }
    }
}

impl From<RegistryError> for InternalError {
    fn from(err: RegistryError) -> Self {
        Self {
            class: err.class(),
            origin: ErrorOrigin::Registry,
            message: err.to_string(),
            detail: Some(ErrorDetail::Registry(err)),
        }
    }
}

///
/// RegistryBuilder
///
/// Build phase. Consumed by `build`, after which no writer exists.
///

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    types: HashMap<TypeRef, Arc<TypeModel>>,
    storage_ids: HashMap<(String, StorageId), TypeRef>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one type model, re-validating uniqueness only.
    ///
    /// Storage ids are scoped by application namespace; the wire record
    /// carries the namespace next to the discriminator.
    pub fn register(&mut self, model: TypeModel) -> Result<(), RegistryError> {
        let type_ref = model.type_ref();

        if self.types.contains_key(&type_ref) {
            return Err(RegistryError::DuplicateType(type_ref));
        }

        let storage_key = (model.app.clone(), model.id);
        if let Some(existing) = self.storage_ids.get(&storage_key) {
            return Err(RegistryError::IdentityCollision {
                id: model.id,
                existing: existing.clone(),
                incoming: type_ref,
            });
        }

        if let Some((id, first, second)) = model.identity_collisions().into_iter().next() {
            return Err(RegistryError::MemberIdentityCollision {
                type_ref,
                id,
                first,
                second,
            });
        }

        tracing::debug!(type_ref = %type_ref, storage_id = %model.id, "registered type model");

        self.storage_ids.insert(storage_key, type_ref.clone());
        self.types.insert(type_ref, Arc::new(model));

        Ok(())
    }

    /// Register every model in order, stopping at the first conflict.
    pub fn register_all(
        &mut self,
        models: impl IntoIterator<Item = TypeModel>,
    ) -> Result<(), RegistryError> {
        for model in models {
            self.register(model)?;
        }

        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Freeze the registry; the serve phase starts here.
    #[must_use]
    pub fn build(self) -> Registry {
        tracing::info!(types = self.types.len(), "type registry frozen");

        Registry {
            types: self.types,
            storage_ids: self.storage_ids,
        }
    }
}

///
/// Registry
///
/// Serve phase: immutable and safe to share across any number of readers.
///

#[derive(Debug)]
pub struct Registry {
    types: HashMap<TypeRef, Arc<TypeModel>>,
    storage_ids: HashMap<(String, StorageId), TypeRef>,
}

impl Registry {
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Resolve a type reference to its model.
    pub fn resolve(&self, type_ref: &TypeRef) -> Result<Arc<TypeModel>, RegistryError> {
        self.types
            .get(type_ref)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownType(type_ref.clone()))
    }

    /// Resolve a wire discriminator to its model.
    pub fn resolve_storage_id(
        &self,
        app: &str,
        id: StorageId,
    ) -> Result<Arc<TypeModel>, RegistryError> {
        self.storage_ids
            .get(&(app.to_string(), id))
            .and_then(|type_ref| self.types.get(type_ref))
            .cloned()
            .ok_or_else(|| RegistryError::UnknownStorageId {
                app: app.to_string(),
                id,
            })
    }

    /// Lazily resolve the target model of a named association.
    pub fn resolve_association<'a>(
        &self,
        model: &'a TypeModel,
        name: &str,
    ) -> Result<(&'a AssociationModel, Arc<TypeModel>), RegistryError> {
        let association =
            model
                .association(name)
                .ok_or_else(|| RegistryError::UnknownAssociation {
                    type_ref: model.type_ref(),
                    name: name.to_string(),
                })?;
        let target = self.resolve(&association.target(&model.app))?;

        Ok((association, target))
    }

    #[must_use]
    pub fn contains(&self, type_ref: &TypeRef) -> bool {
        self.types.contains_key(type_ref)
    }

    /// Iterate registered models in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&TypeRef, &Arc<TypeModel>)> {
        self.types.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Digest of the identity-to-semantics mapping of every registered type.
    ///
    /// Two processes with equal fingerprints agree on every storage id and
    /// member identity, which is the wire compatibility surface.
    #[must_use]
    pub fn fingerprint(&self) -> CatalogFingerprint {
        let mut models: Vec<&Arc<TypeModel>> = self.types.values().collect();
        models.sort_by(|a, b| (&a.app, a.id).cmp(&(&b.app, b.id)));

        let mut hasher = Sha256::new();
        for model in models {
            hasher.update(model.app.as_bytes());
            hasher.update([0]);
            hasher.update(model.id.get().to_be_bytes());
            hasher.update(model.name.as_bytes());
            hasher.update([0]);

            let mut members: Vec<MemberModel<'_>> = model.members().collect();
            members.sort_by_key(|member| member.id());
            for member in members {
                hasher.update(member.id().get().to_be_bytes());
                hasher.update(member.since().to_be_bytes());
                let shape = match member {
                    MemberModel::Field(field) => format!("{}:{}", field.kind, field.cardinality),
                    MemberModel::Association(association) => format!(
                        "{}:{}:{}",
                        association.kind, association.cardinality, association.ref_type
                    ),
                };
                hasher.update(shape.as_bytes());
                hasher.update([0]);
            }
        }

        CatalogFingerprint(hasher.finalize().into())
    }
}

///
/// CatalogFingerprint
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CatalogFingerprint(pub [u8; 32]);

impl Display for CatalogFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{Cardinality, LinkKind, ValueKind},
        test_fixtures::{TypeModelBuilder, whitelabel_catalog},
    };
    use std::thread;

    fn test_registry() -> Registry {
        let mut builder = Registry::builder();
        builder
            .register_all(whitelabel_catalog())
            .expect("fixture catalog should register");
        builder.build()
    }

    #[test]
    fn resolve_returns_registered_model() {
        let registry = test_registry();
        let model = registry
            .resolve(&TypeRef::from_static("sys", "WhitelabelConfig"))
            .expect("registered type should resolve");

        assert_eq!(model.name, "WhitelabelConfig");
        assert_eq!(model.id, StorageId(1127));
    }

    #[test]
    fn resolving_twice_yields_equal_models() {
        let registry = test_registry();
        let type_ref = TypeRef::from_static("sys", "WhitelabelConfig");

        let first = registry.resolve(&type_ref).unwrap();
        let second = registry.resolve(&type_ref).unwrap();

        assert_eq!(*first, *second);
        assert!(Arc::ptr_eq(&first, &second), "models are shared, never copied");
    }

    #[test]
    fn unknown_type_is_not_found() {
        let registry = test_registry();
        let err: InternalError = registry
            .resolve(&TypeRef::from_static("sys", "Missing"))
            .expect_err("unregistered type should fail")
            .into();

        assert_eq!(err.class, ErrorClass::NotFound);
        assert_eq!(err.origin, ErrorOrigin::Registry);
        assert!(
            err.message.contains("type 'sys/Missing' not found"),
            "message should name the missing type"
        );
    }

    #[test]
    fn duplicate_type_registration_is_rejected() {
        let mut builder = Registry::builder();
        builder
            .register(TypeModelBuilder::element("sys", "Group", 5).build())
            .unwrap();

        let err = builder
            .register(TypeModelBuilder::element("sys", "Group", 6).build())
            .expect_err("duplicate name should fail");
        assert!(matches!(err, RegistryError::DuplicateType(ref r) if r.name() == "Group"));

        let internal: InternalError = err.into();
        assert_eq!(internal.class, ErrorClass::InvariantViolation);
    }

    #[test]
    fn same_name_in_other_app_is_allowed() {
        let mut builder = Registry::builder();
        builder
            .register(TypeModelBuilder::element("sys", "Group", 5).build())
            .unwrap();
        builder
            .register(TypeModelBuilder::element("mail", "Group", 5).build())
            .expect("namespaces keep names and storage ids apart");

        assert_eq!(builder.build().len(), 2);
    }

    #[test]
    fn storage_id_collision_is_rejected() {
        let mut builder = Registry::builder();
        builder
            .register(TypeModelBuilder::element("sys", "Group", 5).build())
            .unwrap();

        let err = builder
            .register(TypeModelBuilder::element("sys", "Customer", 5).build())
            .expect_err("storage id reuse should fail");

        assert!(matches!(
            err,
            RegistryError::IdentityCollision { id: StorageId(5), .. }
        ));
    }

    #[test]
    fn member_identity_collision_is_rejected() {
        let model = TypeModelBuilder::aggregated("sys", "Feature", 9)
            .field("a", 100, 1, ValueKind::Number, Cardinality::One)
            .association("b", 100, 1, LinkKind::Reference, Cardinality::ZeroOrOne, "Group")
            .build();

        let err = Registry::builder()
            .register(model)
            .expect_err("fields and associations share one identity namespace");

        assert!(matches!(
            err,
            RegistryError::MemberIdentityCollision { id: MemberId(100), .. }
        ));
    }

    #[test]
    fn resolves_by_storage_id_within_app() {
        let registry = test_registry();

        let model = registry.resolve_storage_id("sys", StorageId(1127)).unwrap();
        assert_eq!(model.name, "WhitelabelConfig");

        assert!(matches!(
            registry.resolve_storage_id("mail", StorageId(1127)),
            Err(RegistryError::UnknownStorageId { .. })
        ));
    }

    #[test]
    fn association_targets_resolve_lazily() {
        let registry = test_registry();
        let model = registry
            .resolve(&TypeRef::from_static("sys", "WhitelabelConfig"))
            .unwrap();

        let (association, target) = registry
            .resolve_association(&model, "certificateInfo")
            .expect("aggregate target should resolve");

        assert_eq!(association.kind, LinkKind::Aggregation);
        assert_eq!(target.name, "CertificateInfo");

        assert!(matches!(
            registry.resolve_association(&model, "nope"),
            Err(RegistryError::UnknownAssociation { .. })
        ));
    }

    #[test]
    fn concurrent_readers_resolve_without_locks() {
        let registry = Arc::new(test_registry());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    registry
                        .resolve(&TypeRef::from_static("sys", "BootstrapFeature"))
                        .map(|model| model.id)
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), StorageId(1249));
        }
    }

    #[test]
    fn fingerprint_tracks_identity_surface_only() {
        let a = test_registry().fingerprint();
        let b = test_registry().fingerprint();
        assert_eq!(a, b, "fingerprint must be deterministic");
        assert_eq!(a.to_string().len(), 64);

        let mut builder = Registry::builder();
        let mut models = whitelabel_catalog();
        for model in &mut models {
            if let Some(field) = model.values.get_mut("jsonTheme") {
                field.id = MemberId(9999);
            }
        }
        builder.register_all(models).unwrap();

        assert_ne!(builder.build().fingerprint(), a);
    }
}
