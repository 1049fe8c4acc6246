use crate::{
    external::SystemFieldProvider,
    model::{
        AssociationModel, Cardinality, FieldModel, LifecycleKind, LinkKind, MemberId, StorageId,
        SystemField, TypeModel, ValueKind,
    },
    registry::Registry,
    value::{Date, Id},
};
use std::collections::BTreeMap;

///
/// FixedIds
///
/// Deterministic provider: ids derive from the type name, the clock is frozen
/// at the epoch.
///

pub(crate) struct FixedIds;

impl SystemFieldProvider for FixedIds {
    fn generate_id(&self, model: &TypeModel) -> Option<Id> {
        Some(Id::new(format!("id-{}", model.name)))
    }

    fn owner_group(&self, model: &TypeModel) -> Option<Id> {
        model.kind.has_system_fields().then(|| Id::new("group"))
    }

    fn permissions(&self, model: &TypeModel) -> Option<Id> {
        model.kind.has_system_fields().then(|| Id::new("perm"))
    }

    fn current_date(&self) -> Date {
        Date::EPOCH
    }
}

pub(crate) fn registry_of(models: impl IntoIterator<Item = TypeModel>) -> Registry {
    let mut builder = Registry::builder();
    builder
        .register_all(models)
        .expect("fixture models should register");
    builder.build()
}

pub(crate) fn whitelabel_registry() -> Registry {
    registry_of(whitelabel_catalog())
}

///
/// TypeModelBuilder
///
/// Test-only helper for assembling `TypeModel`s without a catalog.
/// Element builders pre-populate the system fields with identities 1-4;
/// aggregated builders pre-populate `_id` with identity 1.
///

pub(crate) struct TypeModelBuilder {
    model: TypeModel,
}

impl TypeModelBuilder {
    pub(crate) fn element(app: &str, name: &str, id: u64) -> Self {
        Self::new(app, name, id, LifecycleKind::Element)
            .system(SystemField::Format, 1, ValueKind::Number, Cardinality::One, false)
            .system(SystemField::Id, 2, ValueKind::GeneratedId, Cardinality::One, true)
            .system(SystemField::Permissions, 3, ValueKind::GeneratedId, Cardinality::One, true)
            .system(
                SystemField::OwnerGroup,
                4,
                ValueKind::GeneratedId,
                Cardinality::ZeroOrOne,
                true,
            )
    }

    pub(crate) fn aggregated(app: &str, name: &str, id: u64) -> Self {
        Self::new(app, name, id, LifecycleKind::Aggregated).system(
            SystemField::Id,
            1,
            ValueKind::CustomId,
            Cardinality::One,
            true,
        )
    }

    fn new(app: &str, name: &str, id: u64, kind: LifecycleKind) -> Self {
        Self {
            model: TypeModel {
                app: app.to_string(),
                name: name.to_string(),
                kind,
                id: StorageId(id),
                root_id: kind.has_storage_root().then(|| format!("root-{id}")),
                since: 1,
                versioned: false,
                encrypted: false,
                values: BTreeMap::new(),
                associations: BTreeMap::new(),
                version: 50,
            },
        }
    }

    fn system(
        self,
        field: SystemField,
        id: u64,
        kind: ValueKind,
        cardinality: Cardinality,
        is_final: bool,
    ) -> Self {
        let since = self.model.since;
        self.insert_field(field.name(), id, since, kind, cardinality, is_final)
    }

    pub(crate) fn since(mut self, since: u32) -> Self {
        self.model.since = since;
        for field in self.model.values.values_mut() {
            if field.system_field().is_some() {
                field.since = since;
            }
        }
        self
    }

    pub(crate) const fn encrypted(mut self) -> Self {
        self.model.encrypted = true;
        self
    }

    pub(crate) fn field(
        self,
        name: &str,
        id: u64,
        since: u32,
        kind: ValueKind,
        cardinality: Cardinality,
    ) -> Self {
        self.insert_field(name, id, since, kind, cardinality, false)
    }

    pub(crate) fn final_field(
        self,
        name: &str,
        id: u64,
        since: u32,
        kind: ValueKind,
        cardinality: Cardinality,
    ) -> Self {
        self.insert_field(name, id, since, kind, cardinality, true)
    }

    pub(crate) fn encrypted_field(mut self, name: &str) -> Self {
        if let Some(field) = self.model.values.get_mut(name) {
            field.encrypted = true;
        }
        self
    }

    pub(crate) fn association(
        mut self,
        name: &str,
        id: u64,
        since: u32,
        kind: LinkKind,
        cardinality: Cardinality,
        ref_type: &str,
    ) -> Self {
        self.model.associations.insert(
            name.to_string(),
            AssociationModel {
                name: name.to_string(),
                id: MemberId(id),
                since,
                kind,
                cardinality,
                ref_type: ref_type.to_string(),
                is_final: false,
            },
        );
        self
    }

    pub(crate) fn final_association(mut self, name: &str) -> Self {
        if let Some(association) = self.model.associations.get_mut(name) {
            association.is_final = true;
        }
        self
    }

    fn insert_field(
        mut self,
        name: &str,
        id: u64,
        since: u32,
        kind: ValueKind,
        cardinality: Cardinality,
        is_final: bool,
    ) -> Self {
        self.model.values.insert(
            name.to_string(),
            FieldModel {
                name: name.to_string(),
                id: MemberId(id),
                since,
                kind,
                cardinality,
                is_final,
                encrypted: false,
            },
        );
        self
    }

    pub(crate) fn build(self) -> TypeModel {
        self.model
    }
}

///
/// whitelabel_catalog
///
/// The `sys` whitelabel types at catalog version 50.
///

pub(crate) fn whitelabel_catalog() -> Vec<TypeModel> {
    vec![
        whitelabel_config(),
        bootstrap_feature(),
        certificate_info(),
        ssl_certificate(),
    ]
}

pub(crate) fn whitelabel_config() -> TypeModel {
    let mut model = TypeModelBuilder::element("sys", "WhitelabelConfig", 1127)
        .since(22)
        .field("germanLanguageCode", 1308, 28, ValueKind::String, Cardinality::ZeroOrOne)
        .field("imprintUrl", 1425, 37, ValueKind::String, Cardinality::ZeroOrOne)
        .field("jsonTheme", 1133, 22, ValueKind::String, Cardinality::One)
        .field("metaTags", 1281, 26, ValueKind::String, Cardinality::One)
        .field("privacyStatementUrl", 1496, 42, ValueKind::String, Cardinality::ZeroOrOne)
        .association(
            "bootstrapCustomizations",
            1252,
            24,
            LinkKind::Aggregation,
            Cardinality::Any,
            "BootstrapFeature",
        )
        .association(
            "certificateInfo",
            1506,
            44,
            LinkKind::Aggregation,
            Cardinality::One,
            "CertificateInfo",
        )
        .build();

    renumber(&mut model, &[
        ("_format", 1131),
        ("_id", 1129),
        ("_ownerGroup", 1132),
        ("_permissions", 1130),
    ]);
    model.root_id = Some("A3N5cwAEZw".to_string());
    model
}

pub(crate) fn bootstrap_feature() -> TypeModel {
    let mut model = TypeModelBuilder::aggregated("sys", "BootstrapFeature", 1249)
        .since(24)
        .field("feature", 1251, 24, ValueKind::Number, Cardinality::One)
        .build();
    renumber(&mut model, &[("_id", 1250)]);
    model
}

pub(crate) fn certificate_info() -> TypeModel {
    let mut model = TypeModelBuilder::aggregated("sys", "CertificateInfo", 1500)
        .since(44)
        .field("expiryDate", 1502, 44, ValueKind::Date, Cardinality::ZeroOrOne)
        .field("state", 1503, 44, ValueKind::Number, Cardinality::One)
        .field("type", 1504, 44, ValueKind::Number, Cardinality::One)
        .association(
            "certificate",
            1505,
            44,
            LinkKind::Reference,
            Cardinality::ZeroOrOne,
            "SslCertificate",
        )
        .build();
    renumber(&mut model, &[("_id", 1501)]);
    model
}

pub(crate) fn ssl_certificate() -> TypeModel {
    let mut model = TypeModelBuilder::element("sys", "SslCertificate", 1540)
        .since(44)
        .encrypted()
        .field("certificate", 1546, 44, ValueKind::String, Cardinality::One)
        .field("privateKey", 1547, 44, ValueKind::String, Cardinality::One)
        .encrypted_field("privateKey")
        .field("_ownerEncSessionKey", 1548, 44, ValueKind::Bytes, Cardinality::ZeroOrOne)
        .build();
    renumber(&mut model, &[
        ("_format", 1544),
        ("_id", 1542),
        ("_ownerGroup", 1545),
        ("_permissions", 1543),
    ]);
    model
}

fn renumber(model: &mut TypeModel, ids: &[(&str, u64)]) {
    for (name, id) in ids {
        if let Some(field) = model.values.get_mut(*name) {
            field.id = MemberId(*id);
        }
    }
}
