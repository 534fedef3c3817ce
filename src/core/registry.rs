//! Service registry mapping entity names to their browse services

use crate::core::service::{BrowseService, EntityResolver};
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry for all browsable entities in the application
///
/// Endpoints receive the registry at construction and resolve their declared
/// entity through it; nothing is looked up dynamically.
#[derive(Default, Clone)]
pub struct ServiceRegistry {
    services: HashMap<String, Arc<dyn BrowseService>>,
}

impl ServiceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            services: HashMap::new(),
        }
    }

    /// Register the service for an entity
    ///
    /// Registering the same entity twice replaces the previous service.
    pub fn register(&mut self, entity: impl Into<String>, service: Arc<dyn BrowseService>) {
        self.services.insert(entity.into(), service);
    }

    pub fn with_service(mut self, entity: impl Into<String>, service: Arc<dyn BrowseService>) -> Self {
        self.register(entity, service);
        self
    }

    /// Get all registered entity names
    pub fn entity_types(&self) -> Vec<&str> {
        self.services.keys().map(|s| s.as_str()).collect()
    }
}

impl EntityResolver for ServiceRegistry {
    fn resolve(&self, entity: &str) -> Result<Arc<dyn BrowseService>> {
        self.services
            .get(entity)
            .cloned()
            .ok_or_else(|| anyhow!("Unknown entity type: {}", entity))
    }
}
