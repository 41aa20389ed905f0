use crate::analysis::policies::is_applicable_ivy_version;
use crate::shared::AnalyzerError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Canonical `type:namespace:name:version` key of a package or project.
///
/// The `type` names the ecosystem (e.g. `Maven`, `PyPI`, `Pipenv`) and is
/// compared case-insensitively; all other components are compared exactly.
/// Equality, hashing and ordering agree with each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
    r#type: String,
    namespace: String,
    name: String,
    version: String,
}

impl Identifier {
    pub fn new(
        r#type: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            r#type: r#type.into(),
            namespace: namespace.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// Placeholder identifier with all components empty.
    pub fn empty() -> Self {
        Self::new("", "", "", "")
    }

    pub fn r#type(&self) -> &str {
        &self.r#type
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whether `other` is matched by this identifier.
    ///
    /// With `support_version_range`, this identifier's version may be an Ivy
    /// range (`[1.0,2.0)`) or sub-revision pattern (`1.0.+`) that `other`'s
    /// concrete version has to satisfy. Otherwise the versions must be equal.
    pub fn matches(&self, other: &Identifier, support_version_range: bool) -> bool {
        let base_properties_match = self.type_key() == other.type_key()
            && self.namespace == other.namespace
            && self.name == other.name;

        base_properties_match
            && if support_version_range {
                is_applicable_ivy_version(&self.version, &other.version)
            } else {
                self.version == other.version
            }
    }

    fn type_key(&self) -> String {
        self.r#type.to_lowercase()
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.type_key() == other.type_key()
            && self.namespace == other.namespace
            && self.name == other.name
            && self.version == other.version
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_key().hash(state);
        self.namespace.hash(state);
        self.name.hash(state);
        self.version.hash(state);
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.type_key()
            .cmp(&other.type_key())
            .then_with(|| self.namespace.cmp(&other.namespace))
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.version.cmp(&other.version))
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.r#type, self.namespace, self.name, self.version
        )
    }
}

impl FromStr for Identifier {
    type Err = AnalyzerError;

    /// Parses `type:namespace:name:version`. The version may itself contain
    /// colons, so only the first three separators split components.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(4, ':');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(r#type), Some(namespace), Some(name), Some(version)) => {
                Ok(Self::new(r#type, namespace, name, version))
            }
            _ => Err(AnalyzerError::invalid_configuration(format!(
                "identifier '{}' must have the form 'type:namespace:name:version'",
                s
            ))),
        }
    }
}

impl TryFrom<String> for Identifier {
    type Error = AnalyzerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.to_string()
    }
}
