use crate::{
    error::{ErrorClass, ErrorDetail, ErrorOrigin, InternalError},
    model::Cardinality,
    type_ref::TypeRef,
};
use thiserror::Error as ThisError;

///
/// InstanceError
///
/// Construction and decoding failures. Every variant names the offending
/// type and member so schema mismatches stay diagnosable.
///

#[derive(Debug, ThisError)]
pub enum InstanceError {
    #[error("{type_ref}.{member}: cardinality {cardinality} requires a value and none has a default")]
    CardinalityViolation {
        type_ref: TypeRef,
        member: String,
        cardinality: Cardinality,
    },

    #[error("{type_ref}.{member}: expected {expected}, found {found}")]
    TypeMismatch {
        type_ref: TypeRef,
        member: String,
        expected: String,
        found: String,
    },

    #[error("{type_ref}.{member}: required at version {version} but missing from the payload")]
    MissingRequiredField {
        type_ref: TypeRef,
        member: String,
        version: u32,
    },

    #[error("{type_ref} has no member '{member}'")]
    UnknownMember { type_ref: TypeRef, member: String },

    #[error("{type_ref}.{member} is final and already populated")]
    ImmutableMember { type_ref: TypeRef, member: String },

    #[error("{type_ref}.{member}: required aggregation cycles back to '{target}'")]
    AggregationCycle {
        type_ref: TypeRef,
        member: String,
        target: TypeRef,
    },
}

impl InstanceError {
    /// Type the error was raised against.
    #[must_use]
    pub const fn type_ref(&self) -> &TypeRef {
        match self {
            Self::CardinalityViolation { type_ref, .. }
            | Self::TypeMismatch { type_ref, .. }
            | Self::MissingRequiredField { type_ref, .. }
            | Self::UnknownMember { type_ref, .. }
            | Self::ImmutableMember { type_ref, .. }
            | Self::AggregationCycle { type_ref, .. } => type_ref,
        }
    }

    /// Field or association the error was raised against.
    #[must_use]
    pub fn member(&self) -> &str {
        match self {
            Self::CardinalityViolation { member, .. }
            | Self::TypeMismatch { member, .. }
            | Self::MissingRequiredField { member, .. }
            | Self::UnknownMember { member, .. }
            | Self::ImmutableMember { member, .. }
            | Self::AggregationCycle { member, .. } => member,
        }
    }

    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::MissingRequiredField { .. } => ErrorClass::Corruption,
            _ => ErrorClass::InvalidValue,
        }
    }

    pub(crate) const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::MissingRequiredField { .. } => ErrorOrigin::Version,
            Self::AggregationCycle { .. } => ErrorOrigin::Factory,
            _ => ErrorOrigin::Instance,
        }
    }
}

impl From<InstanceError> for InternalError {
    fn from(err: InstanceError) -> Self {
        Self {
            class: err.class(),
            origin: err.origin(),
            message: err.to_string(),
            detail: Some(ErrorDetail::Instance(err)),
        }
    }
}
