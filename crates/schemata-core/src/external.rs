//! Collaborator boundary.
//!
//! The core never generates identities, assigns permissions, or dereferences
//! REFERENCE associations itself. Those services are injected through the
//! traits below and may block, retry, or fail on their own terms.

use crate::{
    entity::{Entity, InstanceError},
    error::InternalError,
    model::{LinkKind, TypeModel, ValueKind},
    registry::Registry,
    type_ref::TypeRef,
    value::{Date, Id, Reference, Value},
};

///
/// SystemFieldProvider
///
/// Supplies values for the implicit identity, ownership-group and permission
/// fields. `None` leaves the slot reserved for the storage collaborator.
///

pub trait SystemFieldProvider: Send + Sync {
    fn generate_id(&self, model: &TypeModel) -> Option<Id>;

    fn owner_group(&self, model: &TypeModel) -> Option<Id>;

    fn permissions(&self, model: &TypeModel) -> Option<Id>;

    /// Default for non-optional `Date` fields.
    fn current_date(&self) -> Date {
        Date::now()
    }
}

///
/// ReservedSlots
///
/// Provider that fills nothing; every system slot stays null until storage.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct ReservedSlots;

impl SystemFieldProvider for ReservedSlots {
    fn generate_id(&self, _: &TypeModel) -> Option<Id> {
        None
    }

    fn owner_group(&self, _: &TypeModel) -> Option<Id> {
        None
    }

    fn permissions(&self, _: &TypeModel) -> Option<Id> {
        None
    }
}

///
/// LocalIds
///
/// Client-side provider: generates custom ids for aggregated values locally
/// and leaves server-generated ids reserved.
///

#[derive(Clone, Debug, Default)]
pub struct LocalIds {
    owner_group: Option<Id>,
}

impl LocalIds {
    #[must_use]
    pub const fn new(owner_group: Option<Id>) -> Self {
        Self { owner_group }
    }
}

impl SystemFieldProvider for LocalIds {
    fn generate_id(&self, model: &TypeModel) -> Option<Id> {
        let id_field = model.field("_id")?;

        (id_field.kind == ValueKind::CustomId).then(Id::generate)
    }

    fn owner_group(&self, model: &TypeModel) -> Option<Id> {
        if model.kind.has_system_fields() {
            self.owner_group.clone()
        } else {
            None
        }
    }

    fn permissions(&self, _: &TypeModel) -> Option<Id> {
        None
    }
}

///
/// ReferenceResolver
///
/// Looks up the target of a REFERENCE association. A deleted or never
/// existing target is `Ok(None)`, never assumed to succeed.
///

pub trait ReferenceResolver {
    fn resolve_reference(
        &self,
        target: &TypeRef,
        reference: &Reference,
    ) -> Result<Option<Entity>, InternalError>;
}

/// Dereference every target of one REFERENCE association on `entity`.
///
/// Returns one slot per stored reference, in order; `None` marks a target the
/// resolver could not find.
pub fn follow_references(
    registry: &Registry,
    resolver: &dyn ReferenceResolver,
    entity: &Entity,
    association: &str,
) -> Result<Vec<Option<Entity>>, InternalError> {
    let model = entity.model();
    let (descriptor, target) = registry.resolve_association(model, association)?;

    if descriptor.kind != LinkKind::Reference {
        return Err(InstanceError::TypeMismatch {
            type_ref: model.type_ref(),
            member: association.to_string(),
            expected: "Reference association".to_string(),
            found: descriptor.kind.to_string(),
        }
        .into());
    }

    let references: Vec<&Reference> = match entity.get(association) {
        Some(Value::Reference(reference)) => vec![reference],
        Some(Value::List(items)) => items.iter().filter_map(Value::as_reference).collect(),
        _ => Vec::new(),
    };

    let target_ref = target.type_ref();
    references
        .into_iter()
        .map(|reference| resolver.resolve_reference(&target_ref, reference))
        .collect()
}
