use super::*;
use crate::test_fixtures::{TypeModelBuilder, ssl_certificate, whitelabel_catalog, whitelabel_config};

#[test]
fn members_cover_fields_then_associations() {
    let model = whitelabel_config();
    let names: Vec<&str> = model.members().map(MemberModel::name).collect();

    assert_eq!(names.len(), model.values.len() + model.associations.len());
    assert_eq!(names.first(), Some(&"_format"));
    assert_eq!(names.last(), Some(&"certificateInfo"));
}

#[test]
fn member_lookup_by_name_and_identity_agree() {
    let model = whitelabel_config();

    let by_name = model.member("imprintUrl").unwrap();
    let by_id = model.member_by_id(MemberId(1425)).unwrap();

    assert_eq!(by_name.name(), by_id.name());
    assert_eq!(by_id.since(), 37);
    assert_eq!(by_id.cardinality(), Cardinality::ZeroOrOne);
    assert!(matches!(
        model.member("bootstrapCustomizations"),
        Some(MemberModel::Association(_))
    ));
    assert!(model.member("nope").is_none());
}

#[test]
fn fixture_catalog_has_distinct_member_identities() {
    for model in whitelabel_catalog() {
        assert!(
            model.identity_collisions().is_empty(),
            "{} has colliding member identities",
            model.name
        );
    }
}

#[test]
fn members_are_never_older_than_their_type() {
    for model in whitelabel_catalog() {
        for member in model.members() {
            assert!(
                member.since() >= model.since,
                "{}.{} predates its type",
                model.name,
                member.name()
            );
        }
    }
}

#[test]
fn identity_collisions_report_both_names() {
    let model = TypeModelBuilder::aggregated("sys", "Feature", 9)
        .field("left", 100, 1, ValueKind::Number, Cardinality::One)
        .field("right", 100, 1, ValueKind::Number, Cardinality::One)
        .build();

    let collisions = model.identity_collisions();

    assert_eq!(
        collisions,
        vec![(MemberId(100), "left".to_string(), "right".to_string())]
    );
}

#[test]
fn encryption_markers_are_exposed() {
    let model = ssl_certificate();
    let encrypted: Vec<&str> = model
        .encrypted_fields()
        .map(|field| field.name.as_str())
        .collect();

    assert_eq!(encrypted, vec!["privateKey"]);
    assert!(model.requires_session_key());
    assert!(!whitelabel_config().requires_session_key());
}

#[test]
fn system_fields_are_recognised_by_name() {
    let model = whitelabel_config();

    assert_eq!(
        model.system_field(SystemField::Id).map(|field| field.id),
        Some(MemberId(1129))
    );
    assert!(model.field("_id").unwrap().is_reserved_slot());
    assert!(!model.field("_ownerGroup").unwrap().is_reserved_slot());
    assert!(model.field("jsonTheme").unwrap().system_field().is_none());
}

#[test]
fn association_target_stays_in_owner_app() {
    let model = whitelabel_config();
    let target = model.association("certificateInfo").unwrap().target(&model.app);

    assert_eq!(target.to_string(), "sys/CertificateInfo");
}

#[test]
fn lifecycle_kinds_decide_storage_root() {
    assert!(LifecycleKind::Element.has_storage_root());
    assert!(LifecycleKind::ListElement.has_system_fields());
    assert!(!LifecycleKind::Aggregated.has_storage_root());
    assert_eq!("ZeroOrOne".parse::<Cardinality>().ok(), Some(Cardinality::ZeroOrOne));
    assert_eq!(ValueKind::GeneratedId.to_string(), "GeneratedId");
}
