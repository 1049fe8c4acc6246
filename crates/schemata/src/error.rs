use derive_more::Display;
use schemata_config::ConfigError;
use schemata_core::{
    entity::InstanceError,
    error::{ErrorClass, ErrorDetail, ErrorOrigin as CoreErrorOrigin, InternalError},
    registry::RegistryError,
};
use schemata_schema::build::BuildError;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound)
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        let kind = match (&err.detail, err.class) {
            (Some(ErrorDetail::Instance(instance)), _) => {
                ErrorKind::Instance(InstanceErrorKind::from(instance))
            }
            (_, ErrorClass::NotFound) => ErrorKind::NotFound,
            (_, ErrorClass::InvariantViolation) => ErrorKind::Catalog(CatalogErrorKind::Conflict),
            (_, ErrorClass::Corruption) => ErrorKind::Corruption,
            _ => ErrorKind::Internal,
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

impl From<InstanceError> for Error {
    fn from(err: InstanceError) -> Self {
        InternalError::from(err).into()
    }
}

impl From<RegistryError> for Error {
    fn from(err: RegistryError) -> Self {
        InternalError::from(err).into()
    }
}

impl From<BuildError> for Error {
    fn from(err: BuildError) -> Self {
        let kind = match err {
            BuildError::Registry(inner) => return inner.into(),
            BuildError::Validation(_) => CatalogErrorKind::Invalid,
            BuildError::AlreadyInitialized => CatalogErrorKind::AlreadyInitialized,
            BuildError::NotInitialized => CatalogErrorKind::NotInitialized,
            BuildError::Io { .. } | BuildError::Parse { .. } => CatalogErrorKind::Unreadable,
        };

        Self::new(ErrorKind::Catalog(kind), ErrorOrigin::Catalog, err.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Config, ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    Catalog(CatalogErrorKind),
    Instance(InstanceErrorKind),

    /// A type, storage id or association the catalog does not contain.
    NotFound,

    /// A payload violates the schema contract for its own version.
    Corruption,

    /// Configuration could not be read or is invalid.
    Config,

    /// The caller cannot remediate this.
    Internal,
}

///
/// CatalogErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum CatalogErrorKind {
    /// The catalog failed validation.
    Invalid,

    /// Two definitions claim the same name or identity.
    Conflict,

    /// A catalog file could not be read or parsed.
    Unreadable,

    AlreadyInitialized,
    NotInitialized,
}

///
/// InstanceErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum InstanceErrorKind {
    CardinalityViolation,
    TypeMismatch,
    MissingRequiredField,
    UnknownMember,
    ImmutableMember,
    AggregationCycle,
}

impl From<&InstanceError> for InstanceErrorKind {
    fn from(err: &InstanceError) -> Self {
        match err {
            InstanceError::CardinalityViolation { .. } => Self::CardinalityViolation,
            InstanceError::TypeMismatch { .. } => Self::TypeMismatch,
            InstanceError::MissingRequiredField { .. } => Self::MissingRequiredField,
            InstanceError::UnknownMember { .. } => Self::UnknownMember,
            InstanceError::ImmutableMember { .. } => Self::ImmutableMember,
            InstanceError::AggregationCycle { .. } => Self::AggregationCycle,
        }
    }
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Catalog,
    Config,
    External,
    Factory,
    Instance,
    Registry,
    Version,
    Wire,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Registry => Self::Registry,
            CoreErrorOrigin::Factory => Self::Factory,
            CoreErrorOrigin::Instance => Self::Instance,
            CoreErrorOrigin::Version => Self::Version,
            CoreErrorOrigin::Wire => Self::Wire,
            CoreErrorOrigin::External => Self::External,
        }
    }
}
