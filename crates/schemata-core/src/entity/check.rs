use crate::{
    entity::InstanceError,
    model::{AssociationModel, Cardinality, FieldModel, LinkKind, MemberModel, TypeModel, ValueKind},
    value::Value,
};

// Check one value against whichever descriptor the member has.
pub(crate) fn check_member_value(
    model: &TypeModel,
    member: MemberModel<'_>,
    value: &Value,
) -> Result<(), InstanceError> {
    match member {
        MemberModel::Field(field) => check_field_value(model, field, value),
        MemberModel::Association(association) => {
            check_association_value(model, association, value)
        }
    }
}

// Check a field value against its `ValueKind` and cardinality.
pub(crate) fn check_field_value(
    model: &TypeModel,
    field: &FieldModel,
    value: &Value,
) -> Result<(), InstanceError> {
    if value.is_null() {
        if field.cardinality == Cardinality::ZeroOrOne || field.is_reserved_slot() {
            return Ok(());
        }

        return Err(InstanceError::CardinalityViolation {
            type_ref: model.type_ref(),
            member: field.name.clone(),
            cardinality: field.cardinality,
        });
    }

    let matches = match field.kind {
        ValueKind::Number => matches!(value, Value::Number(_)),
        ValueKind::String | ValueKind::CompressedString => matches!(value, Value::Text(_)),
        ValueKind::Boolean => matches!(value, Value::Bool(_)),
        ValueKind::GeneratedId | ValueKind::CustomId => matches!(value, Value::Id(_)),
        ValueKind::Bytes => matches!(value, Value::Bytes(_)),
        ValueKind::Date => matches!(value, Value::Date(_)),
    };

    if matches {
        Ok(())
    } else {
        Err(InstanceError::TypeMismatch {
            type_ref: model.type_ref(),
            member: field.name.clone(),
            expected: field.kind.to_string(),
            found: value.shape().to_string(),
        })
    }
}

// Check an association value against its link kind, target and cardinality.
pub(crate) fn check_association_value(
    model: &TypeModel,
    association: &AssociationModel,
    value: &Value,
) -> Result<(), InstanceError> {
    match (association.cardinality, value) {
        (Cardinality::Any, Value::List(items)) => items
            .iter()
            .try_for_each(|item| check_link_target(model, association, item)),
        (Cardinality::Any, other) => Err(mismatch(model, association, "list", other)),
        (_, Value::List(_)) => Err(mismatch(model, association, "single", value)),
        (Cardinality::ZeroOrOne, Value::Null) => Ok(()),
        (Cardinality::One, Value::Null) => Err(InstanceError::CardinalityViolation {
            type_ref: model.type_ref(),
            member: association.name.clone(),
            cardinality: association.cardinality,
        }),
        (_, single) => check_link_target(model, association, single),
    }
}

// Check one linked value: an owned aggregate of the target type, or a reference.
fn check_link_target(
    model: &TypeModel,
    association: &AssociationModel,
    value: &Value,
) -> Result<(), InstanceError> {
    match (association.kind, value) {
        (LinkKind::Aggregation, Value::Aggregate(child)) => {
            let target = association.target(&model.app);
            let actual = child.type_ref();

            if actual == target {
                Ok(())
            } else {
                Err(InstanceError::TypeMismatch {
                    type_ref: model.type_ref(),
                    member: association.name.clone(),
                    expected: format!("aggregate of {target}"),
                    found: format!("aggregate of {actual}"),
                })
            }
        }
        (LinkKind::Reference, Value::Reference(_)) => Ok(()),
        _ => Err(mismatch(model, association, "single", value)),
    }
}

fn mismatch(
    model: &TypeModel,
    association: &AssociationModel,
    arity: &str,
    found: &Value,
) -> InstanceError {
    InstanceError::TypeMismatch {
        type_ref: model.type_ref(),
        member: association.name.clone(),
        expected: format!(
            "{arity} {} of {}",
            association.kind,
            association.target(&model.app)
        ),
        found: found.shape().to_string(),
    }
}
