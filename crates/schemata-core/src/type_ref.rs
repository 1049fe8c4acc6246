use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use std::{
    borrow::Cow,
    fmt::{self, Display},
    str::FromStr,
};
use thiserror::Error as ThisError;

///
/// TypeRefParseError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum TypeRefParseError {
    #[error("type reference '{0}' must have the form 'app/Type'")]
    MissingSeparator(String),

    #[error("type reference '{0}' has an empty application or type name")]
    EmptyPart(String),
}

///
/// TypeRef
///
/// Lightweight (application, type name) handle used as the registry key.
/// Carries no behaviour beyond equality and lookup.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TypeRef {
    app: Cow<'static, str>,
    name: Cow<'static, str>,
}

impl TypeRef {
    /// Build a reference from owned or borrowed names.
    pub fn new(app: impl Into<Cow<'static, str>>, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            app: app.into(),
            name: name.into(),
        }
    }

    /// Build a reference from static names; usable in `const` position.
    #[must_use]
    pub const fn from_static(app: &'static str, name: &'static str) -> Self {
        Self {
            app: Cow::Borrowed(app),
            name: Cow::Borrowed(name),
        }
    }

    #[must_use]
    pub fn app(&self) -> &str {
        &self.app
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.app, self.name)
    }
}

impl FromStr for TypeRef {
    type Err = TypeRefParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((app, name)) = s.split_once('/') else {
            return Err(TypeRefParseError::MissingSeparator(s.to_string()));
        };
        if app.is_empty() || name.is_empty() {
            return Err(TypeRefParseError::EmptyPart(s.to_string()));
        }

        Ok(Self::new(app.to_string(), name.to_string()))
    }
}

impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TypeRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;

        raw.parse().map_err(D::Error::custom)
    }
}
