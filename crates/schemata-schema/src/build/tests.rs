use super::*;
use schemata_core::{
    error::{ErrorClass, InternalError},
    type_ref::TypeRef,
};
use std::{fs, path::PathBuf};

const CATALOG: &str = r#"[
    {
        "name": "Feature",
        "since": 1,
        "type": "AGGREGATED_TYPE",
        "id": 10,
        "values": {
            "_id": {"name": "_id", "id": 11, "since": 1, "type": "CustomId", "cardinality": "One", "final": true},
            "code": {"name": "code", "id": 12, "since": 3, "type": "Number", "cardinality": "One"}
        },
        "associations": {},
        "app": "demo",
        "version": 5
    },
    {
        "name": "Bundle",
        "since": 1,
        "type": "DATA_TRANSFER_TYPE",
        "id": 20,
        "rootId": "ZGVtbwAU",
        "values": {
            "_format": {"name": "_format", "id": 21, "since": 1, "type": "Number", "cardinality": "One"},
            "_id": {"name": "_id", "id": 22, "since": 1, "type": "GeneratedId", "cardinality": "One", "final": true},
            "_ownerGroup": {"name": "_ownerGroup", "id": 23, "since": 1, "type": "GeneratedId", "cardinality": "ZeroOrOne", "final": true},
            "_permissions": {"name": "_permissions", "id": 24, "since": 1, "type": "GeneratedId", "cardinality": "One", "final": true}
        },
        "associations": {
            "features": {"name": "features", "id": 25, "since": 2, "type": "AGGREGATION", "cardinality": "Any", "refType": "Feature"}
        },
        "app": "demo",
        "version": 5
    }
]"#;

fn catalog() -> Catalog {
    Catalog::from_json_str(CATALOG).unwrap()
}

// Write `contents` to a unique file under the system temp dir.
fn temp_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("schemata-build-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();

    path
}

#[test]
fn build_registry_resolves_every_type() {
    let registry = build_registry(&catalog()).unwrap();

    assert_eq!(registry.len(), 2);
    let bundle = registry
        .resolve(&TypeRef::from_static("demo", "Bundle"))
        .unwrap();
    let (association, target) = registry.resolve_association(&bundle, "features").unwrap();

    assert!(association.is_aggregation());
    assert_eq!(target.name, "Feature");
}

#[test]
fn invalid_catalog_never_builds() {
    let broken = CATALOG.replace("\"since\": 3", "\"since\": 9");

    let err = build_registry(&Catalog::from_json_str(&broken).unwrap()).unwrap_err();

    match err {
        BuildError::Validation(errs) => {
            assert_eq!(errs.flatten()[0].0, "demo/Feature.code");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn registry_conflicts_surface_as_registry_errors() {
    let mut doubled = catalog();
    doubled.merge(catalog());

    let err = build_unchecked(&doubled).unwrap_err();
    let BuildError::Registry(err) = err else {
        panic!("expected a registry error");
    };

    assert_eq!(InternalError::from(err).class, ErrorClass::InvariantViolation);
}

#[test]
fn load_registry_reads_configured_files() {
    let path = temp_file("demo.json", CATALOG);
    let config = schemata_config::Config::from_toml_str(&format!(
        "[catalog]\npaths = [{:?}]\n",
        path.display().to_string()
    ))
    .unwrap();

    let registry = load_registry(&config).unwrap();

    assert!(registry.contains(&TypeRef::from_static("demo", "Feature")));
}

#[test]
fn lax_load_skips_validation() {
    let broken = CATALOG.replace("\"since\": 3", "\"since\": 9");
    let path = temp_file("lax.json", &broken);
    let toml = format!(
        "[catalog]\npaths = [{:?}]\nstrict = false\n",
        path.display().to_string()
    );

    let lax = schemata_config::Config::from_toml_str(&toml).unwrap();
    assert!(load_registry(&lax).is_ok());

    let strict = schemata_config::Config::from_toml_str(&toml.replace("false", "true")).unwrap();
    assert!(matches!(
        load_registry(&strict),
        Err(BuildError::Validation(_))
    ));
}

// The only test that touches the process-wide registry.
#[test]
fn global_registry_installs_once() {
    assert!(matches!(registry(), Err(BuildError::NotInitialized)));

    let broken = CATALOG.replace("\"refType\": \"Feature\"", "\"refType\": \"Missing\"");
    let failed = init_registry(&Catalog::from_json_str(&broken).unwrap());
    assert!(matches!(failed, Err(BuildError::Validation(_))));
    assert!(matches!(registry(), Err(BuildError::NotInitialized)));

    let installed = init_registry(&catalog()).unwrap();
    assert_eq!(installed.len(), 2);
    assert!(std::ptr::eq(installed, registry().unwrap()));

    assert!(matches!(
        init_registry(&catalog()),
        Err(BuildError::AlreadyInitialized)
    ));
}
