mod date;
mod id;


use crate::entity::Entity;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

// re-exports
pub use date::Date;
pub use id::Id;

///
/// Reference
///
/// Non-owning pointer to an independently stored entity.
/// Dereferencing is delegated to a `ReferenceResolver`; the target may be gone.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Reference {
    Element(Id),
    ListElement { list_id: Id, element_id: Id },
}

impl Reference {
    /// Id of the referenced element itself.
    #[must_use]
    pub const fn element_id(&self) -> &Id {
        match self {
            Self::Element(id) | Self::ListElement { element_id: id, .. } => id,
        }
    }
}

impl Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(id) => write!(f, "{id}"),
            Self::ListElement {
                list_id,
                element_id,
            } => write!(f, "{list_id}/{element_id}"),
        }
    }
}

///
/// Value
///
/// Strongly typed value of one field or association on an instance.
///
/// Null      → explicit absence (ZeroOrOne), or a reserved system slot.
/// Aggregate → owned child instance; dropped with its parent.
/// Reference → id of an independent entity; never owned.
/// List      → values of an `Any` association, in order.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Value {
    Null,
    Number(i64),
    Text(String),
    Bool(bool),
    Id(Id),
    Bytes(#[serde(with = "serde_bytes")] Vec<u8>),
    Date(Date),
    Aggregate(Box<Entity>),
    Reference(Reference),
    List(Vec<Self>),
}

impl Value {
    /// Short shape label used in mismatch diagnostics.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::Bool(_) => "bool",
            Self::Id(_) => "id",
            Self::Bytes(_) => "bytes",
            Self::Date(_) => "date",
            Self::Aggregate(_) => "aggregate",
            Self::Reference(_) => "reference",
            Self::List(_) => "list",
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_id(&self) -> Option<&Id> {
        match self {
            Self::Id(id) => Some(id),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_aggregate(&self) -> Option<&Entity> {
        match self {
            Self::Aggregate(entity) => Some(entity),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Id> for Value {
    fn from(id: Id) -> Self {
        Self::Id(id)
    }
}

impl From<Date> for Value {
    fn from(date: Date) -> Self {
        Self::Date(date)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<Entity> for Value {
    fn from(entity: Entity) -> Self {
        Self::Aggregate(Box::new(entity))
    }
}

impl From<Reference> for Value {
    fn from(reference: Reference) -> Self {
        Self::Reference(reference)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}
