//! Module: entity
//! Responsibility: live instances of a type model and their construction.
//!
//! Invariants:
//! - Every instance holds a value for every member of its model.
//! - Final members are never reassigned once populated.
//! - Aggregated children are owned exclusively by their parent and dropped
//!   with it; references are plain ids.

mod check;
mod error;
mod factory;
mod overrides;


use crate::{
    model::{SystemField, TypeModel},
    type_ref::TypeRef,
    value::{Id, Reference, Value},
};
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::{collections::BTreeMap, fmt, sync::Arc};

// re-exports
pub(crate) use check::{check_association_value, check_field_value, check_member_value};
pub use error::InstanceError;
pub use factory::EntityFactory;
pub use overrides::Overrides;

///
/// Entity
///
/// One instance of a type model. Owned by its caller; no state is shared
/// between instances beyond the immutable model.
///

#[derive(Clone)]
pub struct Entity {
    model: Arc<TypeModel>,
    values: BTreeMap<String, Value>,
}

impl Entity {
    pub(crate) const fn from_parts(model: Arc<TypeModel>, values: BTreeMap<String, Value>) -> Self {
        Self { model, values }
    }

    #[must_use]
    pub const fn model(&self) -> &Arc<TypeModel> {
        &self.model
    }

    #[must_use]
    pub fn type_ref(&self) -> TypeRef {
        self.model.type_ref()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Value of the implicit identity field, once assigned.
    #[must_use]
    pub fn id(&self) -> Option<&Id> {
        self.get(SystemField::Id.name()).and_then(Value::as_id)
    }

    /// Assign one member, enforcing its descriptor and the final rule.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), InstanceError> {
        let value = value.into();
        let member = self
            .model
            .member(name)
            .ok_or_else(|| InstanceError::UnknownMember {
                type_ref: self.model.type_ref(),
                member: name.to_string(),
            })?;

        if member.is_final() && self.values.get(name).is_some_and(is_populated) {
            return Err(InstanceError::ImmutableMember {
                type_ref: self.model.type_ref(),
                member: name.to_string(),
            });
        }

        check_member_value(&self.model, member, &value)?;
        self.values.insert(name.to_string(), value);

        Ok(())
    }

    /// Member values in name order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Directly owned aggregated children, with the association they sit in.
    pub fn aggregates(&self) -> impl Iterator<Item = (&str, &Self)> {
        self.model
            .associations
            .values()
            .filter(|association| association.is_aggregation())
            .filter_map(|association| {
                self.values
                    .get(&association.name)
                    .map(|value| (association.name.as_str(), value))
            })
            .flat_map(|(name, value)| {
                let children: Vec<&Self> = match value {
                    Value::Aggregate(child) => vec![child.as_ref()],
                    Value::List(items) => items.iter().filter_map(Value::as_aggregate).collect(),
                    _ => Vec::new(),
                };
                children.into_iter().map(move |child| (name, child))
            })
    }

    /// Every aggregated instance reachable from this one, depth first.
    /// Deleting this instance deletes all of them.
    #[must_use]
    pub fn owned_descendants(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        for (_, child) in self.aggregates() {
            out.push(child);
            out.extend(child.owned_descendants());
        }

        out
    }

    /// Non-owning references held by this instance, with their association.
    #[must_use]
    pub fn references(&self) -> Vec<(&str, &Reference)> {
        let mut out = Vec::new();
        for association in self.model.associations.values() {
            match self.values.get(&association.name) {
                Some(Value::Reference(reference)) => out.push((association.name.as_str(), reference)),
                Some(Value::List(items)) => out.extend(
                    items
                        .iter()
                        .filter_map(Value::as_reference)
                        .map(|reference| (association.name.as_str(), reference)),
                ),
                _ => {}
            }
        }

        out
    }
}

// A final member counts as populated once it holds anything but an explicit absence.
fn is_populated(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::List(items) => !items.is_empty(),
        _ => true,
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.model.app == other.model.app
            && self.model.name == other.model.name
            && self.values == other.values
    }
}

impl Eq for Entity {}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("type_ref", &self.model.type_ref())
            .field("values", &self.values)
            .finish()
    }
}

impl Serialize for Entity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry("_type", &self.model.type_ref())?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }

        map.end()
    }
}
