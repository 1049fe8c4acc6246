use crate::{
    entity::{Entity, InstanceError, Overrides, check_association_value, check_field_value},
    error::InternalError,
    external::SystemFieldProvider,
    model::{AssociationModel, Cardinality, FieldModel, LinkKind, SystemField, TypeModel, ValueKind},
    registry::Registry,
    type_ref::TypeRef,
    value::Value,
};
use std::{collections::BTreeMap, sync::Arc};

///
/// EntityFactory
///
/// Builds fully initialised instances from a type model. Aggregation targets
/// are resolved lazily through the registry; system slots are filled by the
/// injected provider.
///

#[derive(Clone, Copy)]
pub struct EntityFactory<'a> {
    registry: &'a Registry,
    provider: &'a dyn SystemFieldProvider,
}

impl<'a> EntityFactory<'a> {
    #[must_use]
    pub const fn new(registry: &'a Registry, provider: &'a dyn SystemFieldProvider) -> Self {
        Self { registry, provider }
    }

    #[must_use]
    pub const fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Create a new instance, applying defaults to every member not overridden.
    pub fn create(
        &self,
        model: &Arc<TypeModel>,
        overrides: Overrides,
    ) -> Result<Entity, InternalError> {
        let mut visiting = Vec::new();

        self.create_inner(model, overrides, &mut visiting)
    }

    /// Resolve `type_ref` and create an instance of it.
    pub fn create_by_ref(
        &self,
        type_ref: &TypeRef,
        overrides: Overrides,
    ) -> Result<Entity, InternalError> {
        let model = self.registry.resolve(type_ref)?;

        self.create(&model, overrides)
    }

    fn create_inner(
        &self,
        model: &Arc<TypeModel>,
        overrides: Overrides,
        visiting: &mut Vec<TypeRef>,
    ) -> Result<Entity, InternalError> {
        let type_ref = model.type_ref();
        let _span = tracing::trace_span!("create_entity", type_ref = %type_ref).entered();

        // Phase 1: reject names the model does not declare.
        let mut overrides = overrides.into_inner();
        if let Some(unknown) = overrides
            .keys()
            .find(|name| model.member(name.as_str()).is_none())
        {
            return Err(InstanceError::UnknownMember {
                type_ref,
                member: unknown.clone(),
            }
            .into());
        }

        visiting.push(type_ref);
        let mut values = BTreeMap::new();

        // Phase 2: fields.
        for field in model.values.values() {
            let value = match overrides.remove(&field.name) {
                Some(value) => {
                    check_field_value(model, field, &value)?;
                    value
                }
                None => self.default_field_value(model, field)?,
            };
            values.insert(field.name.clone(), value);
        }

        // Phase 3: associations.
        for association in model.associations.values() {
            let value = match overrides.remove(&association.name) {
                Some(value) => {
                    check_association_value(model, association, &value)?;
                    value
                }
                None => self.default_association_value(model, association, visiting)?,
            };
            values.insert(association.name.clone(), value);
        }

        visiting.pop();

        Ok(Entity::from_parts(Arc::clone(model), values))
    }

    /// Default for a field with no supplied value.
    pub(crate) fn default_field_value(
        &self,
        model: &TypeModel,
        field: &FieldModel,
    ) -> Result<Value, InstanceError> {
        match field.system_field() {
            Some(SystemField::Format) => return Ok(Value::Number(0)),
            Some(SystemField::Id) => return Ok(self.provider.generate_id(model).into()),
            Some(SystemField::OwnerGroup) => return Ok(self.provider.owner_group(model).into()),
            Some(SystemField::Permissions) => return Ok(self.provider.permissions(model).into()),
            None => {}
        }

        if field.cardinality == Cardinality::ZeroOrOne {
            return Ok(Value::Null);
        }

        let value = match field.kind {
            ValueKind::Number => Value::Number(0),
            ValueKind::String | ValueKind::CompressedString => Value::Text(String::new()),
            ValueKind::Boolean => Value::Bool(false),
            ValueKind::Bytes => Value::Bytes(Vec::new()),
            ValueKind::Date => Value::Date(self.provider.current_date()),
            ValueKind::GeneratedId | ValueKind::CustomId => {
                return Err(InstanceError::CardinalityViolation {
                    type_ref: model.type_ref(),
                    member: field.name.clone(),
                    cardinality: field.cardinality,
                });
            }
        };

        Ok(value)
    }

    /// Default for an association with no supplied value.
    ///
    /// A required aggregation is built as a default instance of its target;
    /// a required reference has no default.
    pub(crate) fn default_association_value(
        &self,
        model: &TypeModel,
        association: &AssociationModel,
        visiting: &mut Vec<TypeRef>,
    ) -> Result<Value, InternalError> {
        match (association.cardinality, association.kind) {
            (Cardinality::Any, _) => Ok(Value::List(Vec::new())),
            (Cardinality::ZeroOrOne, _) => Ok(Value::Null),
            (Cardinality::One, LinkKind::Reference) => Err(InstanceError::CardinalityViolation {
                type_ref: model.type_ref(),
                member: association.name.clone(),
                cardinality: association.cardinality,
            }
            .into()),
            (Cardinality::One, LinkKind::Aggregation) => {
                let target = association.target(&model.app);
                if visiting.contains(&target) {
                    return Err(InstanceError::AggregationCycle {
                        type_ref: model.type_ref(),
                        member: association.name.clone(),
                        target,
                    }
                    .into());
                }

                let target_model = self.registry.resolve(&target)?;
                let child = self.create_inner(&target_model, Overrides::new(), visiting)?;

                Ok(Value::Aggregate(Box::new(child)))
            }
        }
    }

    /// Default for any member, used when a payload predates the member.
    pub(crate) fn default_member_value(
        &self,
        model: &TypeModel,
        name: &str,
    ) -> Result<Value, InternalError> {
        if let Some(field) = model.field(name) {
            return self.default_field_value(model, field).map_err(Into::into);
        }

        let association = model
            .association(name)
            .ok_or_else(|| InstanceError::UnknownMember {
                type_ref: model.type_ref(),
                member: name.to_string(),
            })?;
        let mut visiting = vec![model.type_ref()];

        self.default_association_value(model, association, &mut visiting)
    }
}
