use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};

///
/// Cardinality
///
/// How many values a field or association may hold.
/// Fields only ever use `One` or `ZeroOrOne`.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
pub enum Cardinality {
    #[default]
    One,
    ZeroOrOne,
    Any,
}

impl Cardinality {
    /// Whether a value must always be present.
    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::One)
    }

    #[must_use]
    pub const fn is_many(self) -> bool {
        matches!(self, Self::Any)
    }
}

///
/// ValueKind
///
/// Scalar shape of a field value.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum ValueKind {
    Boolean,
    Bytes,
    CompressedString,
    CustomId,
    Date,
    GeneratedId,
    Number,
    String,
}

impl ValueKind {
    /// Identifier kinds are never defaulted by the core.
    #[must_use]
    pub const fn is_id(self) -> bool {
        matches!(self, Self::CustomId | Self::GeneratedId)
    }

    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::CompressedString | Self::String)
    }
}

///
/// LifecycleKind
///
/// How an instance's identity and persistence behave.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize)]
pub enum LifecycleKind {
    /// Independent record with its own storage row.
    Standalone,
    /// Independently stored element addressed by a single id.
    Element,
    /// Element stored inside a list, addressed by (list id, element id).
    ListElement,
    /// Embedded value that only exists inside its parent.
    Aggregated,
}

impl LifecycleKind {
    /// Whether instances are stored under a storage root.
    #[must_use]
    pub const fn has_storage_root(self) -> bool {
        !matches!(self, Self::Aggregated)
    }

    /// Whether the type carries the implicit identity, ownership-group and
    /// permission fields.
    #[must_use]
    pub const fn has_system_fields(self) -> bool {
        !matches!(self, Self::Aggregated)
    }
}

///
/// LinkKind
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize)]
pub enum LinkKind {
    /// Target is owned and embedded, sharing the parent's lifecycle.
    Aggregation,
    /// Target is an independent entity identified by id.
    Reference,
}

impl LinkKind {
    #[must_use]
    pub const fn is_owning(self) -> bool {
        matches!(self, Self::Aggregation)
    }
}
