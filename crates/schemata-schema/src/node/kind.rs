use derive_more::Display;
use schemata_core::model::{LifecycleKind, LinkKind};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;

///
/// TypeKindDef
///
/// Lifecycle tag as written by the catalog generator.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKindDef {
    #[display("ELEMENT_TYPE")]
    ElementType,
    #[display("LIST_ELEMENT_TYPE")]
    ListElementType,
    #[display("AGGREGATED_TYPE")]
    AggregatedType,
    #[display("DATA_TRANSFER_TYPE")]
    #[serde(alias = "STANDALONE_TYPE")]
    DataTransferType,
}

impl From<TypeKindDef> for LifecycleKind {
    fn from(kind: TypeKindDef) -> Self {
        match kind {
            TypeKindDef::ElementType => Self::Element,
            TypeKindDef::ListElementType => Self::ListElement,
            TypeKindDef::AggregatedType => Self::Aggregated,
            TypeKindDef::DataTransferType => Self::Standalone,
        }
    }
}

///
/// AssociationKindDef
///
/// Link tag as written by the catalog generator. Every non-aggregation tag
/// is a reference; the distinction only tells storage where the target lives.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssociationKindDef {
    #[display("AGGREGATION")]
    Aggregation,
    #[display("ELEMENT_ASSOCIATION")]
    #[serde(alias = "REFERENCE")]
    ElementAssociation,
    #[display("LIST_ASSOCIATION")]
    ListAssociation,
    #[display("LIST_ELEMENT_ASSOCIATION")]
    ListElementAssociation,
}

impl From<AssociationKindDef> for LinkKind {
    fn from(kind: AssociationKindDef) -> Self {
        match kind {
            AssociationKindDef::Aggregation => Self::Aggregation,
            AssociationKindDef::ElementAssociation
            | AssociationKindDef::ListAssociation
            | AssociationKindDef::ListElementAssociation => Self::Reference,
        }
    }
}

///
/// CatalogVersion
///
/// The generator writes the catalog version as a string (`"50"`); older
/// tooling wrote a number. Both are accepted.
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct CatalogVersion(pub u32);

impl CatalogVersion {
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl<'de> Deserialize<'de> for CatalogVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct VersionVisitor;

        impl de::Visitor<'_> for VersionVisitor {
            type Value = CatalogVersion;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a catalog version as a number or numeric string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                u32::try_from(v)
                    .map(CatalogVersion)
                    .map_err(|_| E::custom(format!("catalog version {v} out of range")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                u32::try_from(v)
                    .map(CatalogVersion)
                    .map_err(|_| E::custom(format!("catalog version {v} out of range")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.trim()
                    .parse()
                    .map(CatalogVersion)
                    .map_err(|_| E::custom(format!("invalid catalog version '{v}'")))
            }
        }

        deserializer.deserialize_any(VersionVisitor)
    }
}
