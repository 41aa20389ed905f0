use super::{Identifier, Provenance};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// A resolved third-party package.
///
/// Packages are identified by their [`Identifier`] alone: equality and
/// ordering ignore all metadata, so a set of packages holds at most one entry
/// per identifier.
#[derive(Debug, Clone, Serialize)]
pub struct Package {
    id: Identifier,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    declared_licenses: BTreeSet<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    homepage_url: String,
    provenance: Provenance,
}

impl Package {
    pub fn new(id: Identifier, provenance: Provenance) -> Self {
        Self {
            id,
            declared_licenses: BTreeSet::new(),
            description: String::new(),
            homepage_url: String::new(),
            provenance,
        }
    }

    pub fn with_declared_license(mut self, license: impl Into<String>) -> Self {
        self.declared_licenses.insert(license.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_homepage_url(mut self, homepage_url: impl Into<String>) -> Self {
        self.homepage_url = homepage_url.into();
        self
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn declared_licenses(&self) -> &BTreeSet<String> {
        &self.declared_licenses
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn homepage_url(&self) -> &str {
        &self.homepage_url
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }
}

impl PartialEq for Package {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Package {}

impl Ord for Package {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl PartialOrd for Package {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
