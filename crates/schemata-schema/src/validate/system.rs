use crate::{err, error::ErrorTree, node::TypeDef};
use schemata_core::model::{Cardinality, SystemField, ValueKind};

/// Check the implicit system fields a type declares.
///
/// Stored kinds must declare `_id`, `_ownerGroup` and `_permissions` with
/// their fixed shapes; aggregated kinds may only carry a custom `_id`.
/// `_format` is optional everywhere but always a required number.
pub(crate) fn validate_system_fields(def: &TypeDef, errs: &mut ErrorTree) {
    let stored = def.lifecycle().has_system_fields();

    for field in SystemField::ALL {
        let Some(value) = def.values.get(field.name()) else {
            if stored && field.is_required_for_storage() {
                err!(errs, "{} must declare system field '{}'", def.kind, field.name());
            }
            continue;
        };

        match field {
            SystemField::Id => {
                if value.cardinality != Cardinality::One || !value.is_final {
                    err!(errs, "'_id' must be a final One field");
                }
                let expected_kind = if stored {
                    value.kind.is_id()
                } else {
                    value.kind == ValueKind::CustomId
                };
                if !expected_kind {
                    err!(errs, "'_id' cannot have kind {}", value.kind);
                }
            }
            SystemField::OwnerGroup | SystemField::Permissions if !stored => {
                err!(errs, "{} must not declare '{}'", def.kind, field.name());
            }
            SystemField::OwnerGroup => {
                if value.cardinality != Cardinality::ZeroOrOne || value.kind != ValueKind::GeneratedId {
                    err!(errs, "'_ownerGroup' must be a ZeroOrOne GeneratedId field");
                }
            }
            SystemField::Permissions => {
                if value.cardinality != Cardinality::One
                    || !value.is_final
                    || value.kind != ValueKind::GeneratedId
                {
                    err!(errs, "'_permissions' must be a final One GeneratedId field");
                }
            }
            SystemField::Format => {
                if value.cardinality != Cardinality::One || value.kind != ValueKind::Number {
                    err!(errs, "'_format' must be a One Number field");
                }
            }
        }
    }
}
