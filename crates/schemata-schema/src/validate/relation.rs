use crate::{
    err,
    error::ErrorTree,
    node::{AssociationKindDef, Catalog, TypeDef},
};
use schemata_core::model::Cardinality;
use std::collections::{BTreeMap, BTreeSet};

// Index definitions by (app, name) for target lookups.
fn index(catalog: &Catalog) -> BTreeMap<(&str, &str), &TypeDef> {
    catalog
        .types()
        .iter()
        .map(|def| ((def.app.as_str(), def.name.as_str()), def))
        .collect()
}

/// Every association targets a type in the owner's app; aggregations must
/// target aggregated types.
pub fn validate_association_targets(catalog: &Catalog, errs: &mut ErrorTree) {
    let types = index(catalog);

    for def in catalog.types() {
        for association in def.associations.values() {
            let route = format!("{}.{}", def.type_ref(), association.name);
            let Some(target) = types.get(&(def.app.as_str(), association.ref_type.as_str())) else {
                errs.add_for(
                    route,
                    format!("refType '{}/{}' is not in the catalog", def.app, association.ref_type),
                );
                continue;
            };

            let aggregated_target = !target.lifecycle().has_system_fields();
            if association.kind == AssociationKindDef::Aggregation && !aggregated_target {
                errs.add_for(
                    route,
                    format!("AGGREGATION target '{}' is a {}", target.name, target.kind),
                );
            } else if association.kind != AssociationKindDef::Aggregation && aggregated_target {
                errs.add_for(
                    route,
                    format!("{} target '{}' is aggregated", association.kind, target.name),
                );
            }
        }
    }
}

/// Required (`One`) aggregations must not form a cycle; no instance of such
/// a type could ever be completed.
pub fn validate_required_aggregations(catalog: &Catalog, errs: &mut ErrorTree) {
    // Phase 1: collect required aggregation targets per type.
    let mut edges = BTreeMap::<(&str, &str), Vec<&str>>::new();
    for def in catalog.types() {
        let required = def.associations.values().filter(|a| {
            a.kind == AssociationKindDef::Aggregation && a.cardinality == Cardinality::One
        });
        for association in required {
            edges
                .entry((def.app.as_str(), def.name.as_str()))
                .or_default()
                .push(association.ref_type.as_str());
        }
    }

    // Phase 2: walk from every type and report each cycle once, at its root.
    let mut reported = BTreeSet::new();
    for &(app, name) in edges.keys() {
        let mut path = vec![name];
        if let Some(cycle) = find_cycle(&edges, app, name, &mut path) {
            let members: BTreeSet<&str> = cycle.iter().copied().collect();
            if reported.insert((app, members)) {
                err!(
                    errs,
                    "required aggregations form a cycle in app '{app}': {}",
                    cycle.join(" -> ")
                );
            }
        }
    }
}

// Depth-first search returning the first cycle through `start`, if any.
fn find_cycle<'a>(
    edges: &BTreeMap<(&'a str, &'a str), Vec<&'a str>>,
    app: &'a str,
    start: &'a str,
    path: &mut Vec<&'a str>,
) -> Option<Vec<&'a str>> {
    let current = *path.last()?;
    for &target in edges.get(&(app, current)).into_iter().flatten() {
        if target == start {
            let mut cycle = path.clone();
            cycle.push(start);
            return Some(cycle);
        }
        if path.contains(&target) {
            continue;
        }

        path.push(target);
        if let Some(cycle) = find_cycle(edges, app, start, path) {
            return Some(cycle);
        }
        path.pop();
    }

    None
}
