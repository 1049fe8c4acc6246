//! Module: wire
//! Responsibility: the identity-addressed record shape every encoder honours.
//!
//! Invariants:
//! - Members are addressed by `MemberId`, never by name.
//! - The type is addressed by (application, `StorageId`).
//! - Aggregated children nest as whole records; references stay ids.
//!
//! Byte-level encoding is left to the transport; `WireRecord` is serde-ready.

mod codec;


use crate::{
    model::{MemberId, StorageId},
    value::{Date, Id, Reference},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use codec::encode;

///
/// WireRecord
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct WireRecord {
    pub app: String,
    pub type_id: StorageId,
    /// Catalog version the producer was running.
    pub version: u32,
    pub members: BTreeMap<MemberId, WireValue>,
}

impl WireRecord {
    pub fn new(app: impl Into<String>, type_id: StorageId, version: u32) -> Self {
        Self {
            app: app.into(),
            type_id,
            version,
            members: BTreeMap::new(),
        }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, id: MemberId, value: WireValue) -> Self {
        self.members.insert(id, value);
        self
    }

    #[must_use]
    pub fn get(&self, id: MemberId) -> Option<&WireValue> {
        self.members.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: MemberId) -> bool {
        self.members.contains_key(&id)
    }

    pub fn remove(&mut self, id: MemberId) -> Option<WireValue> {
        self.members.remove(&id)
    }
}

///
/// WireValue
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum WireValue {
    Null,
    Number(i64),
    Text(String),
    Bool(bool),
    Id(Id),
    Bytes(#[serde(with = "serde_bytes")] Vec<u8>),
    Date(Date),
    Record(Box<WireRecord>),
    Reference(Reference),
    List(Vec<Self>),
}
