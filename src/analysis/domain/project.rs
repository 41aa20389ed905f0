use super::{Identifier, Issue, VcsInfo};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

/// How a dependency is linked into the depending code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageLinkage {
    Dynamic,
    Static,
    ProjectDynamic,
    ProjectStatic,
}

/// A project, i.e. first-party code defined by a definition file in the
/// analyzed tree.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    id: Identifier,
    definition_file_path: String,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    declared_licenses: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vcs: Option<VcsInfo>,
    #[serde(skip_serializing_if = "String::is_empty")]
    homepage_url: String,
    scopes: Vec<Scope>,
}

impl Project {
    pub fn new(id: Identifier, definition_file_path: impl Into<String>) -> Self {
        Self {
            id,
            definition_file_path: definition_file_path.into(),
            declared_licenses: BTreeSet::new(),
            vcs: None,
            homepage_url: String::new(),
            scopes: Vec::new(),
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scopes.push(scope);
        self
    }

    pub fn with_declared_license(mut self, license: impl Into<String>) -> Self {
        self.declared_licenses.insert(license.into());
        self
    }

    pub fn with_vcs(mut self, vcs: VcsInfo) -> Self {
        self.vcs = Some(vcs);
        self
    }

    pub fn with_homepage_url(mut self, homepage_url: impl Into<String>) -> Self {
        self.homepage_url = homepage_url.into();
        self
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Path of the definition file, relative to the analysis root.
    pub fn definition_file_path(&self) -> &str {
        &self.definition_file_path
    }

    pub fn declared_licenses(&self) -> &BTreeSet<String> {
        &self.declared_licenses
    }

    pub fn vcs(&self) -> Option<&VcsInfo> {
        self.vcs.as_ref()
    }

    pub fn homepage_url(&self) -> &str {
        &self.homepage_url
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    pub fn scope(&self, name: &str) -> Option<&Scope> {
        self.scopes.iter().find(|scope| scope.name == name)
    }
}

/// A named group of dependencies, such as `compile` or `test`.
#[derive(Debug, Clone, Serialize)]
pub struct Scope {
    pub name: String,
    pub dependencies: Vec<DependencyNode>,
}

impl Scope {
    pub fn new(name: impl Into<String>, dependencies: Vec<DependencyNode>) -> Self {
        Self {
            name: name.into(),
            dependencies,
        }
    }

    /// Identifiers of all packages reachable from this scope, excluding projects.
    pub fn package_ids(&self) -> BTreeSet<Identifier> {
        let mut ids = BTreeSet::new();
        for node in &self.dependencies {
            node.collect_package_ids(&mut ids);
        }
        ids
    }
}

/// A reference to a package inside a dependency tree.
#[derive(Debug, Clone, Serialize)]
pub struct PackageReference {
    pub id: Identifier,
    pub linkage: PackageLinkage,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<DependencyNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,
}

impl PackageReference {
    pub fn new(id: Identifier) -> Self {
        Self {
            id,
            linkage: PackageLinkage::Dynamic,
            dependencies: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn with_dependency(mut self, node: DependencyNode) -> Self {
        self.dependencies.push(node);
        self
    }
}

/// A node in a dependency tree.
///
/// Project nodes share the resolved [`Project`] through an `Arc`, so every
/// reference to a project resolved within the same batch points at the same
/// allocation.
#[derive(Debug, Clone)]
pub enum DependencyNode {
    Package(PackageReference),
    Project(Arc<Project>),
}

impl DependencyNode {
    pub fn id(&self) -> &Identifier {
        match self {
            DependencyNode::Package(reference) => &reference.id,
            DependencyNode::Project(project) => project.id(),
        }
    }

    pub fn as_project(&self) -> Option<&Arc<Project>> {
        match self {
            DependencyNode::Project(project) => Some(project),
            DependencyNode::Package(_) => None,
        }
    }

    fn collect_package_ids(&self, ids: &mut BTreeSet<Identifier>) {
        match self {
            DependencyNode::Package(reference) => {
                ids.insert(reference.id.clone());
                for child in &reference.dependencies {
                    child.collect_package_ids(ids);
                }
            }
            // Packages of a referenced project are reported by its own result.
            DependencyNode::Project(_) => {}
        }
    }
}

impl Serialize for DependencyNode {
    /// Project nodes serialize as a reference; the project itself is reported
    /// under its own definition file.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DependencyNode::Package(reference) => reference.serialize(serializer),
            DependencyNode::Project(project) => {
                let mut state = serializer.serialize_struct("ProjectReference", 3)?;
                state.serialize_field("id", project.id())?;
                state.serialize_field("linkage", &PackageLinkage::ProjectDynamic)?;
                state.serialize_field("definition_file_path", project.definition_file_path())?;
                state.end()
            }
        }
    }
}
