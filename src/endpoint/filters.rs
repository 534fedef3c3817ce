//! Filter catalog endpoint: lists the values each filter accepts

use crate::core::error::BrowseError;
use crate::core::response::{ApiResponse, FiltersBody};
use crate::core::service::{BrowseService, EntityResolver, FilterCatalogProvider, UnimplementedCatalog};
use std::sync::Arc;

/// Resolved service for a catalog request
pub struct ValidatedCatalog {
    service: Arc<dyn BrowseService>,
}

/// Endpoint returning `{ filters: <catalog> }`
///
/// Takes no filter, sort or paging parameters. The catalog itself comes from
/// a [`FilterCatalogProvider`]; without one every call fails with
/// `INTERNAL_ERROR`.
#[derive(Clone)]
pub struct FilterCatalogEndpoint {
    entity: String,
    resolver: Arc<dyn EntityResolver>,
    provider: Arc<dyn FilterCatalogProvider>,
}

impl FilterCatalogEndpoint {
    pub fn new(entity: impl Into<String>, resolver: Arc<dyn EntityResolver>) -> Self {
        Self {
            entity: entity.into(),
            resolver,
            provider: Arc::new(UnimplementedCatalog),
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn FilterCatalogProvider>) -> Self {
        self.provider = provider;
        self
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Resolve the entity's service
    pub fn validate(&self) -> Result<ValidatedCatalog, BrowseError> {
        let service = self.resolver.resolve(&self.entity).map_err(|e| {
            tracing::debug!(entity = %self.entity, error = %e, "Entity resolution failed");
            BrowseError::invalid_entity(e)
        })?;

        Ok(ValidatedCatalog { service })
    }

    pub async fn process(
        &self,
        validated: ValidatedCatalog,
    ) -> Result<ApiResponse<FiltersBody>, BrowseError> {
        let filters = self
            .provider
            .get_filters_values(validated.service.as_ref())
            .await
            .map_err(|e| {
                tracing::warn!(entity = %self.entity, error = %e, "Filter catalog failed");
                BrowseError::internal(e)
            })?;

        Ok(ApiResponse::ok(FiltersBody { filters }))
    }

    /// `validate` followed by `process`
    pub async fn handle(&self) -> Result<ApiResponse<FiltersBody>, BrowseError> {
        let validated = self.validate()?;
        self.process(validated).await
    }
}
