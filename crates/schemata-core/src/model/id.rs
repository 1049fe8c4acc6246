use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// StorageId
///
/// Wire and storage discriminator of a type model.
/// Stable for the lifetime of the catalog and never reused by another type.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct StorageId(pub u64);

impl StorageId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

///
/// MemberId
///
/// Wire identity of one field or association.
/// Fields and associations of a type share one identity namespace.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct MemberId(pub u64);

impl MemberId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}
