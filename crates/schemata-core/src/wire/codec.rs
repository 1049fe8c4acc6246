use crate::{
    entity::{Entity, EntityFactory, InstanceError, check_member_value},
    error::InternalError,
    model::{MemberModel, TypeModel},
    value::Value,
    version::{FieldPresence, classify_in_record},
    wire::{WireRecord, WireValue},
};
use std::{collections::BTreeMap, sync::Arc};

/// Encode an instance, addressing every member by its wire identity and
/// stamping the model's catalog version.
#[must_use]
pub fn encode(entity: &Entity) -> WireRecord {
    let model = entity.model();
    let mut record = WireRecord::new(model.app.clone(), model.id, model.version);

    for member in model.members() {
        if let Some(value) = entity.get(member.name()) {
            record.members.insert(member.id(), value_to_wire(value));
        }
    }

    record
}

fn value_to_wire(value: &Value) -> WireValue {
    match value {
        Value::Null => WireValue::Null,
        Value::Number(n) => WireValue::Number(*n),
        Value::Text(text) => WireValue::Text(text.clone()),
        Value::Bool(b) => WireValue::Bool(*b),
        Value::Id(id) => WireValue::Id(id.clone()),
        Value::Bytes(bytes) => WireValue::Bytes(bytes.clone()),
        Value::Date(date) => WireValue::Date(*date),
        Value::Aggregate(child) => WireValue::Record(Box::new(encode(child))),
        Value::Reference(reference) => WireValue::Reference(reference.clone()),
        Value::List(items) => WireValue::List(items.iter().map(value_to_wire).collect()),
    }
}

impl EntityFactory<'_> {
    /// Decode a record produced at any catalog version.
    ///
    /// Members introduced after the record's version take their defaults,
    /// optional members missing at a version that knew them become explicit
    /// absences, and required members missing at such a version fail.
    /// Identities this schema does not know (written by a newer producer)
    /// are ignored.
    pub fn decode(&self, record: &WireRecord) -> Result<Entity, InternalError> {
        let model = self
            .registry()
            .resolve_storage_id(&record.app, record.type_id)?;

        self.decode_with(&model, record)
    }

    fn decode_with(
        &self,
        model: &Arc<TypeModel>,
        record: &WireRecord,
    ) -> Result<Entity, InternalError> {
        let unknown = record
            .members
            .keys()
            .filter(|id| model.member_by_id(**id).is_none())
            .count();
        if unknown > 0 {
            tracing::warn!(
                type_ref = %model.type_ref(),
                version = record.version,
                unknown,
                "ignoring member identities unknown to this catalog"
            );
        }

        let mut values = BTreeMap::new();
        for member in model.members() {
            let value = match classify_in_record(model, member.name(), record)? {
                FieldPresence::Present => {
                    let wire = record.get(member.id()).ok_or_else(|| {
                        InternalError::wire_corruption(format!(
                            "{}.{} classified present but not in record",
                            model.type_ref(),
                            member.name()
                        ))
                    })?;
                    let value = self.value_from_wire(model, member, wire)?;
                    check_member_value(model, member, &value)?;
                    value
                }
                FieldPresence::AbsentByDesign => self.absent_member_value(model, member)?,
                FieldPresence::AbsentUnexpected => {
                    if member.cardinality().is_many() {
                        Value::List(Vec::new())
                    } else {
                        Value::Null
                    }
                }
            };
            values.insert(member.name().to_string(), value);
        }

        Ok(Entity::from_parts(Arc::clone(model), values))
    }

    // A member newer than the record takes its default; one with no default
    // is recorded as an explicit absence.
    fn absent_member_value(
        &self,
        model: &TypeModel,
        member: MemberModel<'_>,
    ) -> Result<Value, InternalError> {
        match self.default_member_value(model, member.name()) {
            Err(err)
                if matches!(
                    err.instance_error(),
                    Some(InstanceError::CardinalityViolation { .. })
                ) =>
            {
                tracing::debug!(
                    type_ref = %model.type_ref(),
                    member = member.name(),
                    "member has no default; decoded as absent"
                );
                Ok(Value::Null)
            }
            other => other,
        }
    }

    fn value_from_wire(
        &self,
        model: &TypeModel,
        member: MemberModel<'_>,
        wire: &WireValue,
    ) -> Result<Value, InternalError> {
        let value = match wire {
            WireValue::Null => Value::Null,
            WireValue::Number(n) => Value::Number(*n),
            WireValue::Text(text) => Value::Text(text.clone()),
            WireValue::Bool(b) => Value::Bool(*b),
            WireValue::Id(id) => Value::Id(id.clone()),
            WireValue::Bytes(bytes) => Value::Bytes(bytes.clone()),
            WireValue::Date(date) => Value::Date(*date),
            WireValue::Reference(reference) => Value::Reference(reference.clone()),
            WireValue::List(items) => Value::List(
                items
                    .iter()
                    .map(|item| self.value_from_wire(model, member, item))
                    .collect::<Result<_, _>>()?,
            ),
            WireValue::Record(child) => {
                let MemberModel::Association(association) = member else {
                    return Err(InstanceError::TypeMismatch {
                        type_ref: model.type_ref(),
                        member: member.name().to_string(),
                        expected: "scalar".to_string(),
                        found: "record".to_string(),
                    }
                    .into());
                };

                let target = self.registry().resolve(&association.target(&model.app))?;
                if child.app != target.app || child.type_id != target.id {
                    return Err(InstanceError::TypeMismatch {
                        type_ref: model.type_ref(),
                        member: member.name().to_string(),
                        expected: format!("record of {} ({})", target.type_ref(), target.id),
                        found: format!("record {}/{}", child.app, child.type_id),
                    }
                    .into());
                }

                Value::Aggregate(Box::new(self.decode_with(&target, child)?))
            }
        };

        Ok(value)
    }
}
