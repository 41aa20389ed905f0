use crate::adapters::outbound::package_managers::{PipFactory, PipenvFactory};
use crate::analysis::domain::AnalyzerConfiguration;
use crate::ports::outbound::{CommandRunner, PackageManager, PackageManagerFactory};
use std::path::Path;
use std::sync::Arc;

/// Registry of the package managers known to the analyzer
///
/// Names are unique ignoring ASCII case. Registering a factory under a name
/// that is already taken replaces the earlier one.
#[derive(Clone, Default)]
pub struct PackageManagerRegistry {
    factories: Vec<Arc<dyn PackageManagerFactory>>,
}

impl PackageManagerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every package manager shipped in this crate.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(PipFactory);
        registry.register(PipenvFactory);
        registry
    }

    /// Registers `factory`, returning the factory it replaced, if any.
    pub fn register<F>(&mut self, factory: F) -> Option<Arc<dyn PackageManagerFactory>>
    where
        F: PackageManagerFactory + 'static,
    {
        self.register_arc(Arc::new(factory))
    }

    pub fn register_arc(
        &mut self,
        factory: Arc<dyn PackageManagerFactory>,
    ) -> Option<Arc<dyn PackageManagerFactory>> {
        match self.position(factory.type_name()) {
            Some(index) => Some(std::mem::replace(&mut self.factories[index], factory)),
            None => {
                self.factories.push(factory);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn PackageManagerFactory>> {
        self.position(name).map(|index| &self.factories[index])
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.factories.iter().map(|f| f.type_name()).collect()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Instantiates every package manager enabled in `configuration`.
    ///
    /// # Arguments
    /// * `analysis_root` - Canonical root directory of the analysis
    /// * `configuration` - Run configuration, including per-manager options
    /// * `command_runner` - Runner shared by all created package managers
    pub fn create_enabled(
        &self,
        analysis_root: &Path,
        configuration: &AnalyzerConfiguration,
        command_runner: Arc<dyn CommandRunner>,
    ) -> Vec<Arc<dyn PackageManager>> {
        self.factories
            .iter()
            .filter(|factory| configuration.is_enabled(factory.type_name()))
            .map(|factory| factory.create(analysis_root, configuration, command_runner.clone()))
            .collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.factories
            .iter()
            .position(|factory| factory.type_name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Debug for PackageManagerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageManagerRegistry")
            .field("package_managers", &self.names())
            .finish()
    }
}
