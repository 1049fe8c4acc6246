//! Catalog validation orchestration.
//!
//! Validation runs before any runtime model is built. A catalog that fails
//! here must never reach the registry.

pub mod identity;
pub mod naming;
pub mod relation;
pub mod system;


use crate::{
    error::ErrorTree,
    node::{Catalog, ValidateNode},
};

/// Run full catalog validation in a staged, deterministic order.
pub fn validate_catalog(catalog: &Catalog) -> Result<(), ErrorTree> {
    // Phase 1: validate each type (structural + local invariants).
    let mut errors = validate_nodes(catalog);

    // Phase 2: enforce catalog-wide invariants.
    validate_global(catalog, &mut errors);

    errors.result()
}

// Validate every type definition, routing its errors under `app/Type`.
fn validate_nodes(catalog: &Catalog) -> ErrorTree {
    let mut errors = ErrorTree::new();
    for def in catalog.types() {
        if let Err(errs) = def.validate() {
            errors.merge_for(def.route_key(), errs);
        }
    }

    errors
}

// Run global validation passes that require a full catalog view.
fn validate_global(catalog: &Catalog, errors: &mut ErrorTree) {
    naming::validate_unique_type_names(catalog, errors);
    identity::validate_storage_ids(catalog, errors);
    relation::validate_association_targets(catalog, errors);
    relation::validate_required_aggregations(catalog, errors);
}
