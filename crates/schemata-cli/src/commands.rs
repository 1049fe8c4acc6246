use crate::Command;
use schemata::{
    config::Config,
    core::{type_ref::TypeRefParseError, wire::WireRecord},
    prelude::*,
};
use std::{collections::BTreeMap, fs, path::PathBuf};
use thiserror::Error as ThisError;

///
/// CliError
///

#[derive(Debug, ThisError)]
pub(crate) enum CliError {
    #[error(transparent)]
    Schemata(#[from] Error),

    #[error(transparent)]
    TypeRef(#[from] TypeRefParseError),

    #[error("invalid override '{0}': expected NAME=VALUE")]
    Override(String),

    #[error("override '{name}' does not fit the member's kind")]
    OverrideValue { name: String },

    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Execute one command against the registry named by `config`.
pub(crate) fn run(command: &Command, config: &Config) -> Result<String, CliError> {
    let registry = schemata::load_registry(config)?;
    let schemata = Schemata::new(&registry).with_provider(LocalIds::default());

    match command {
        Command::Check => Ok(format!(
            "catalog ok: {} types, fingerprint {}",
            registry.len(),
            registry.fingerprint()
        )),

        Command::Show { type_ref } => {
            let model = schemata.resolve(&type_ref.parse::<TypeRef>()?)?;

            Ok(serde_json::to_string_pretty(model.as_ref())?)
        }

        Command::Classify { type_ref, at } => {
            let presence: BTreeMap<String, FieldPresence> = schemata
                .classify_all(&type_ref.parse::<TypeRef>()?, *at)?
                .into_iter()
                .collect();

            Ok(serde_json::to_string_pretty(&presence)?)
        }

        Command::Create { type_ref, set } => {
            let model = schemata.resolve(&type_ref.parse::<TypeRef>()?)?;
            let overrides = parse_overrides(&model, set)?;
            let entity = schemata.create(&model.type_ref(), overrides)?;

            Ok(serde_json::to_string_pretty(&entity)?)
        }

        Command::Decode { record } => {
            let text = fs::read_to_string(record).map_err(|source| CliError::Io {
                path: record.clone(),
                source,
            })?;
            let record: WireRecord = serde_json::from_str(&text)?;
            let entity = schemata.decode(&record)?;

            Ok(serde_json::to_string_pretty(&entity)?)
        }

        Command::Fingerprint => Ok(registry.fingerprint().to_string()),
    }
}

// `name=<json>`; bare words that are not JSON are taken as strings. Strings
// become ids, dates or references when the member's kind calls for one.
fn parse_overrides(model: &TypeModel, pairs: &[String]) -> Result<Overrides, CliError> {
    let mut overrides = Overrides::new();

    for pair in pairs {
        let (name, raw) = pair
            .split_once('=')
            .filter(|(name, _)| !name.is_empty())
            .ok_or_else(|| CliError::Override(pair.clone()))?;

        let json = serde_json::from_str::<serde_json::Value>(raw)
            .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
        let value = override_value(model, name, json).ok_or_else(|| CliError::OverrideValue {
            name: name.to_string(),
        })?;
        overrides.insert(name, value);
    }

    Ok(overrides)
}

fn override_value(model: &TypeModel, name: &str, json: serde_json::Value) -> Option<Value> {
    use serde_json::Value as Json;

    if let Some(field) = model.field(name) {
        return match (field.kind, json) {
            (_, Json::Null) => Some(Value::Null),
            (ValueKind::GeneratedId | ValueKind::CustomId, Json::String(s)) => {
                Some(Value::Id(Id::new(s)))
            }
            (ValueKind::Date, Json::String(s)) => Date::parse_rfc3339(&s).ok().map(Value::Date),
            (ValueKind::Date, Json::Number(n)) => {
                n.as_i64().map(|millis| Value::Date(Date::from_millis(millis)))
            }
            (ValueKind::Bytes, Json::Array(items)) => items
                .iter()
                .map(|item| item.as_u64().and_then(|b| u8::try_from(b).ok()))
                .collect::<Option<Vec<u8>>>()
                .map(Value::Bytes),
            (_, json) => plain(json),
        };
    }

    match (model.association(name).map(|a| a.kind), json) {
        (Some(LinkKind::Reference), Json::String(s)) => Some(Value::Reference(reference(&s))),
        (_, json) => plain(json),
    }
}

// `list/element` addresses a list element; anything else is an element id.
fn reference(raw: &str) -> Reference {
    match raw.split_once('/') {
        Some((list, element)) => Reference::ListElement {
            list_id: Id::new(list),
            element_id: Id::new(element),
        },
        None => Reference::Element(Id::new(raw)),
    }
}

fn plain(json: serde_json::Value) -> Option<Value> {
    use serde_json::Value as Json;

    match json {
        Json::Null => Some(Value::Null),
        Json::Bool(b) => Some(Value::Bool(b)),
        Json::String(s) => Some(Value::Text(s)),
        Json::Number(n) => n.as_i64().map(Value::Number),
        Json::Array(_) | Json::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemata::error::{ErrorKind, InstanceErrorKind};

    const SYS_CATALOG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../schema/sys/catalog/sys.json");

    fn config() -> Config {
        Config::from_toml_str(&format!("[catalog]\npaths = [{SYS_CATALOG:?}]\n")).unwrap()
    }

    fn show(type_ref: &str) -> Command {
        Command::Show {
            type_ref: type_ref.to_string(),
        }
    }

    #[test]
    fn check_reports_type_count() {
        let output = run(&Command::Check, &config()).unwrap();

        assert!(output.starts_with("catalog ok: 4 types"));
    }

    #[test]
    fn fingerprint_is_stable_across_loads() {
        let a = run(&Command::Fingerprint, &config()).unwrap();
        let b = run(&Command::Fingerprint, &config()).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn show_prints_model_json() {
        let output = run(&show("sys/WhitelabelConfig"), &config()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["name"], "WhitelabelConfig");
        assert!(json["values"]["imprintUrl"].is_object());
    }

    #[test]
    fn show_rejects_malformed_and_unknown_refs() {
        assert!(matches!(
            run(&show("WhitelabelConfig"), &config()),
            Err(CliError::TypeRef(_))
        ));

        let Err(CliError::Schemata(err)) = run(&show("sys/Nope"), &config()) else {
            panic!("expected a schemata error");
        };
        assert!(err.is_not_found());
    }

    #[test]
    fn classify_prints_presence_per_member() {
        let command = Command::Classify {
            type_ref: "sys/WhitelabelConfig".to_string(),
            at: 30,
        };

        let output = run(&command, &config()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["imprintUrl"], "AbsentByDesign");
        assert_eq!(json["metaTags"], "Present");
    }

    #[test]
    fn create_applies_overrides() {
        let command = Command::Create {
            type_ref: "sys/WhitelabelConfig".to_string(),
            set: vec!["jsonTheme=\"dark\"".to_string(), "metaTags=plain".to_string()],
        };

        let output = run(&command, &config()).unwrap();

        assert!(output.contains("dark"));
        assert!(output.contains("plain"));
    }

    #[test]
    fn create_surfaces_instance_errors() {
        let command = Command::Create {
            type_ref: "sys/WhitelabelConfig".to_string(),
            set: vec!["jsonTheme=7".to_string()],
        };

        let Err(CliError::Schemata(err)) = run(&command, &config()) else {
            panic!("expected a schemata error");
        };
        assert_eq!(err.kind, ErrorKind::Instance(InstanceErrorKind::TypeMismatch));
    }

    #[test]
    fn decode_reads_record_file() {
        let config = config();
        let registry = schemata::load_registry(&config).unwrap();
        let schemata = Schemata::new(&registry).with_provider(LocalIds::default());
        let entity = schemata
            .create(
                &TypeRef::from_static("sys", "WhitelabelConfig"),
                Overrides::new().with("jsonTheme", "light"),
            )
            .unwrap();

        let dir = std::env::temp_dir().join(format!("schemata-cli-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("record.json");
        fs::write(&path, serde_json::to_string(&schemata.encode(&entity)).unwrap()).unwrap();

        let output = run(&Command::Decode { record: path }, &config).unwrap();

        assert!(output.contains("light"));
    }

    fn model(name: &'static str) -> std::sync::Arc<TypeModel> {
        schemata::load_registry(&config())
            .unwrap()
            .resolve(&TypeRef::from_static("sys", name))
            .unwrap()
    }

    fn pairs(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn malformed_override_is_rejected() {
        let whitelabel = model("WhitelabelConfig");

        assert!(matches!(
            parse_overrides(&whitelabel, &pairs(&["=1"])),
            Err(CliError::Override(_))
        ));
        assert!(matches!(
            parse_overrides(&whitelabel, &pairs(&["jsonTheme=[1]"])),
            Err(CliError::OverrideValue { .. })
        ));

        let overrides = parse_overrides(&whitelabel, &pairs(&["flag=true", "n=3"])).unwrap();
        assert_eq!(overrides.get("flag"), Some(&Value::Bool(true)));
        assert_eq!(overrides.get("n"), Some(&Value::Number(3)));
    }

    #[test]
    fn overrides_follow_member_kind() {
        let info = model("CertificateInfo");

        let overrides = parse_overrides(
            &info,
            &pairs(&["_id=info-1", "expiryDate=86400000", "certificate=cert-1"]),
        )
        .unwrap();

        assert_eq!(overrides.get("_id"), Some(&Value::Id(Id::new("info-1"))));
        assert_eq!(
            overrides.get("expiryDate"),
            Some(&Value::Date(Date::from_millis(86_400_000)))
        );
        assert_eq!(
            overrides.get("certificate"),
            Some(&Value::Reference(Reference::Element(Id::new("cert-1"))))
        );

        let key = parse_overrides(&model("SslCertificate"), &pairs(&["_ownerEncSessionKey=[1,2]"]))
            .unwrap();
        assert_eq!(key.get("_ownerEncSessionKey"), Some(&Value::Bytes(vec![1, 2])));

        assert!(matches!(
            parse_overrides(&info, &pairs(&["expiryDate=soon"])),
            Err(CliError::OverrideValue { .. })
        ));
    }

    #[test]
    fn create_accepts_typed_overrides() {
        let command = Command::Create {
            type_ref: "sys/CertificateInfo".to_string(),
            set: pairs(&["_id=info-1", "certificate=list-1/cert-1"]),
        };

        let output = run(&command, &config()).unwrap();

        assert!(output.contains("info-1"));
        assert!(output.contains("cert-1"));
    }
}
