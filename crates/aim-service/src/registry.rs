//! Workspace registry.
//!
//! The [`WorkspaceRegistry`] maps workspace names (`local`, `http`, ...) to
//! factories, so front-ends can pick a workspace from configuration.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::config::SessionConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::workspace::Workspace;

/// Factory function type for workspaces.
type WorkspaceFactory =
    Box<dyn Fn(&SessionConfig) -> ServiceResult<Arc<dyn Workspace>> + Send + Sync>;

/// Named workspace factories.
pub struct WorkspaceRegistry {
    factories: FxHashMap<String, WorkspaceFactory>,
}

impl WorkspaceRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: FxHashMap::default(),
        }
    }

    /// Register a workspace factory under a name, replacing any previous one.
    pub fn register_factory(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(&SessionConfig) -> ServiceResult<Arc<dyn Workspace>> + Send + Sync + 'static,
    ) {
        let name = name.into();
        debug!("Registering workspace: {}", name);
        self.factories.insert(name, Box::new(factory));
    }

    /// Create the workspace named by `config.workspace`.
    pub fn create(&self, config: &SessionConfig) -> ServiceResult<Arc<dyn Workspace>> {
        match self.factories.get(&config.workspace) {
            Some(factory) => factory(config),
            None => Err(ServiceError::Configuration(format!(
                "no workspace registered with name '{}' (available: {})",
                config.workspace,
                self.available_workspaces().join(", ")
            ))),
        }
    }

    /// List registered workspace names, sorted.
    pub fn available_workspaces(&self) -> Vec<String> {
        let mut names: Vec<_> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a workspace is registered.
    pub fn has_workspace(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

impl Default for WorkspaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
