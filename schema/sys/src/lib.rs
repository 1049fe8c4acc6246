//! Generated `sys` catalog snapshot and handles for its types.

use schemata::{
    Error,
    core::{registry::Registry, type_ref::TypeRef},
    prelude::Catalog,
};

/// Catalog file as emitted by the model generator.
pub const SYS_CATALOG_JSON: &str = include_str!("../catalog/sys.json");

/// Catalog version of the snapshot.
pub const SYS_VERSION: u32 = 50;

pub const WHITELABEL_CONFIG: TypeRef = TypeRef::from_static("sys", "WhitelabelConfig");
pub const BOOTSTRAP_FEATURE: TypeRef = TypeRef::from_static("sys", "BootstrapFeature");
pub const CERTIFICATE_INFO: TypeRef = TypeRef::from_static("sys", "CertificateInfo");
pub const SSL_CERTIFICATE: TypeRef = TypeRef::from_static("sys", "SslCertificate");

/// Parse the snapshot without validating it.
pub fn catalog() -> Result<Catalog, Error> {
    Ok(Catalog::from_json_str(SYS_CATALOG_JSON)?)
}

/// Validate the snapshot and freeze it into a registry.
pub fn registry() -> Result<Registry, Error> {
    Ok(schemata::schema::build::build_registry(&catalog()?)?)
}
