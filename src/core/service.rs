//! Collaborator and hook traits used by the endpoints

use crate::core::query::NormalizedQuery;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Data-access service answering browse queries for one entity
///
/// The endpoints are agnostic to the store behind it. Rows are opaque JSON.
#[async_trait]
pub trait BrowseService: Send + Sync {
    /// Fetch one page of rows
    async fn get(&self, query: &NormalizedQuery) -> Result<Vec<Value>>;

    /// Total number of rows matching the last `get`, ignoring paging
    ///
    /// Only called when `get` returned at least one row.
    async fn get_totals(&self) -> Result<u64>;
}

/// Looks up the service behind a declared entity name
///
/// Resolution failures become `INVALID_ENTITY` errors, never `INTERNAL_ERROR`.
pub trait EntityResolver: Send + Sync {
    fn resolve(&self, entity: &str) -> Result<Arc<dyn BrowseService>>;
}

/// Transforms the page of rows before it is placed in the response body
#[async_trait]
pub trait RowFormatter: Send + Sync {
    async fn format_rows(&self, rows: Vec<Value>) -> Result<Vec<Value>>;
}

/// Produces the catalog of legal filter values for an entity
///
/// The default implementation fails: a catalog endpoint must be given a
/// provider that overrides it.
#[async_trait]
pub trait FilterCatalogProvider: Send + Sync {
    async fn get_filters_values(&self, _service: &dyn BrowseService) -> Result<Value> {
        Err(anyhow::anyhow!(
            "Method getFiltersValues should be implemented in your API"
        ))
    }
}

/// Provider used when none is supplied
#[derive(Debug, Clone, Copy, Default)]
pub struct UnimplementedCatalog;

impl FilterCatalogProvider for UnimplementedCatalog {}

#[async_trait]
impl<F> RowFormatter for F
where
    F: Fn(Value) -> Result<Value> + Send + Sync,
{
    async fn format_rows(&self, rows: Vec<Value>) -> Result<Vec<Value>> {
        rows.into_iter().map(self).collect()
    }
}
