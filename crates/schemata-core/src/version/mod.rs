//! Module: version
//! Responsibility: decide whether a member belongs in a payload produced at a
//! given catalog version.
//!
//! A member is expected in a payload stamped with version `V` iff its
//! `since <= V`. Members introduced after `V` are absent by design and take
//! defaults; they are never an error. This is what lets newer catalogs read
//! older records and older catalogs read newer ones.


use crate::{
    entity::InstanceError,
    model::{MemberModel, TypeModel},
    wire::WireRecord,
};
use derive_more::Display;
use serde::Serialize;
use std::collections::BTreeMap;

///
/// FieldPresence
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
pub enum FieldPresence {
    /// The member existed at the instance's version (and, for payload-aware
    /// classification, is in the payload).
    Present,
    /// The member did not exist yet at the instance's version.
    AbsentByDesign,
    /// The member existed at the instance's version but the payload omits
    /// it; only reachable for optional and many-valued members.
    AbsentUnexpected,
}

/// Whether a member introduced at `since` is expected at `instance_version`.
#[must_use]
pub const fn is_expected(since: u32, instance_version: u32) -> bool {
    since <= instance_version
}

/// Classify a member by version alone.
pub fn classify_field(
    model: &TypeModel,
    name: &str,
    instance_version: u32,
) -> Result<FieldPresence, InstanceError> {
    let member = lookup(model, name)?;

    Ok(if is_expected(member.since(), instance_version) {
        FieldPresence::Present
    } else {
        FieldPresence::AbsentByDesign
    })
}

/// Classify a member against a concrete payload.
///
/// A required member that was expected but is missing fails with
/// `MissingRequiredField`.
pub fn classify_in_record(
    model: &TypeModel,
    name: &str,
    record: &WireRecord,
) -> Result<FieldPresence, InstanceError> {
    let member = lookup(model, name)?;

    if !is_expected(member.since(), record.version) {
        return Ok(FieldPresence::AbsentByDesign);
    }
    if record.contains(member.id()) {
        return Ok(FieldPresence::Present);
    }
    if member.cardinality().is_required() {
        return Err(InstanceError::MissingRequiredField {
            type_ref: model.type_ref(),
            member: name.to_string(),
            version: record.version,
        });
    }

    Ok(FieldPresence::AbsentUnexpected)
}

/// Classify every member of `model` against `record`, failing on the first
/// missing required member.
pub fn classify_record(
    model: &TypeModel,
    record: &WireRecord,
) -> Result<BTreeMap<String, FieldPresence>, InstanceError> {
    model
        .members()
        .map(|member| {
            classify_in_record(model, member.name(), record)
                .map(|presence| (member.name().to_string(), presence))
        })
        .collect()
}

/// Members a payload stamped with `instance_version` is expected to carry.
pub fn members_at(model: &TypeModel, instance_version: u32) -> impl Iterator<Item = MemberModel<'_>> {
    model
        .members()
        .filter(move |member| is_expected(member.since(), instance_version))
}

fn lookup<'a>(model: &'a TypeModel, name: &str) -> Result<MemberModel<'a>, InstanceError> {
    model.member(name).ok_or_else(|| InstanceError::UnknownMember {
        type_ref: model.type_ref(),
        member: name.to_string(),
    })
}
