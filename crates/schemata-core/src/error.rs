use crate::{entity::InstanceError, registry::RegistryError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Not a stable API; the facade crate maps it onto the public error surface.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `origin`.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    /// Construct an InternalError without structured detail.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Construct an external-collaborator failure.
    pub fn external(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::External, message)
    }

    /// Construct a wire-origin corruption error.
    pub(crate) fn wire_corruption(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Corruption, ErrorOrigin::Wire, message)
    }

    /// Borrow the registry detail, if this error came from the registry.
    #[must_use]
    pub const fn registry_error(&self) -> Option<&RegistryError> {
        match &self.detail {
            Some(ErrorDetail::Registry(err)) => Some(err),
            _ => None,
        }
    }

    /// Borrow the instance detail, if this error came from instance handling.
    #[must_use]
    pub const fn instance_error(&self) -> Option<&InstanceError> {
        match &self.detail {
            Some(ErrorDetail::Instance(err)) => Some(err),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.class, ErrorClass::NotFound)
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`InternalError`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Registry(RegistryError),

    #[error("{0}")]
    Instance(InstanceError),
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// Stored or received data violates the schema contract.
    Corruption,
    /// A caller referenced something the catalog does not contain.
    NotFound,
    /// A value supplied by the caller does not fit its descriptor.
    InvalidValue,
    /// Startup-time catalog defect; the registry must not be served.
    InvariantViolation,
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Corruption => "corruption",
            Self::NotFound => "not_found",
            Self::InvalidValue => "invalid_value",
            Self::InvariantViolation => "invariant_violation",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Registry,
    Factory,
    Instance,
    Version,
    Wire,
    External,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Registry => "registry",
            Self::Factory => "factory",
            Self::Instance => "instance",
            Self::Version => "version",
            Self::Wire => "wire",
            Self::External => "external",
        };
        write!(f, "{label}")
    }
}
