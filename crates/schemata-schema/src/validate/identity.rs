use crate::{err, error::ErrorTree, node::Catalog};
use std::collections::BTreeMap;

/// Storage ids are unique per application; they are the wire discriminator.
pub fn validate_storage_ids(catalog: &Catalog, errs: &mut ErrorTree) {
    let mut by_app = BTreeMap::<&str, BTreeMap<u64, &str>>::new();

    for def in catalog.types() {
        let ids = by_app.entry(def.app.as_str()).or_default();
        match ids.get(&def.id) {
            Some(prev) if *prev != def.name => err!(
                errs,
                "storage id {} of '{}/{}' already used by '{}/{prev}'",
                def.id,
                def.app,
                def.name,
                def.app
            ),
            Some(_) => {}
            None => {
                ids.insert(def.id, def.name.as_str());
            }
        }
    }
}
