use crate::{err, error::ErrorTree, node::Catalog};
use schemata_core::{MAX_MEMBER_NAME_LEN, MAX_TYPE_NAME_LEN};
use std::collections::BTreeMap;

/// Ensure type names are non-empty, ASCII identifiers within the maximum length.
pub(crate) fn validate_type_name(name: &str) -> Result<(), String> {
    validate_ident("type name", name, MAX_TYPE_NAME_LEN)
}

/// Application namespaces follow the type-name rules.
pub(crate) fn validate_app_name(app: &str) -> Result<(), String> {
    validate_ident("app name", app, MAX_TYPE_NAME_LEN)
}

/// Member names may carry the leading underscore of system fields.
pub(crate) fn validate_member_name(name: &str) -> Result<(), String> {
    validate_ident("member name", name, MAX_MEMBER_NAME_LEN)
}

fn validate_ident(label: &str, ident: &str, max: usize) -> Result<(), String> {
    if ident.is_empty() {
        return Err(format!("{label} is empty"));
    }
    if ident.len() > max {
        return Err(format!("{label} '{ident}' exceeds max length {max}"));
    }
    if !ident.is_ascii() {
        return Err(format!("{label} '{ident}' must be ASCII"));
    }
    if ident.contains('/') || ident.chars().any(char::is_whitespace) {
        return Err(format!("{label} '{ident}' contains a separator"));
    }

    Ok(())
}

/// `(app, name)` is unique across the whole catalog.
pub fn validate_unique_type_names(catalog: &Catalog, errs: &mut ErrorTree) {
    let mut seen = BTreeMap::<(&str, &str), usize>::new();

    for def in catalog.types() {
        let count = seen.entry((def.app.as_str(), def.name.as_str())).or_default();
        *count += 1;
        if *count == 2 {
            err!(errs, "duplicate type '{}/{}'", def.app, def.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_empty_long_and_non_ascii_names() {
        assert!(validate_type_name("").is_err());
        assert!(validate_type_name(&"A".repeat(MAX_TYPE_NAME_LEN + 1)).is_err());
        assert!(validate_type_name("Zertifikät").is_err());
        assert!(validate_app_name("sys/extra").is_err());
    }

    #[test]
    fn accepts_generator_names() {
        assert!(validate_type_name("WhitelabelConfig").is_ok());
        assert!(validate_member_name("_ownerEncSessionKey").is_ok());
        assert!(validate_app_name("tutanota").is_ok());
    }

    proptest! {
        #[test]
        fn identifiers_within_bounds_pass(name in "[_A-Za-z][_A-Za-z0-9]{0,63}") {
            prop_assert!(validate_member_name(&name).is_ok());
        }

        #[test]
        fn separators_always_fail(head in "[A-Za-z]{1,20}", tail in "[A-Za-z]{1,20}") {
            let slash = format!("{head}/{tail}");
            let space = format!("{head} {tail}");

            prop_assert!(validate_type_name(&slash).is_err());
            prop_assert!(validate_type_name(&space).is_err());
        }
    }
}
