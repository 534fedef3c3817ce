//! Browse data endpoint: validate, query the service, shape `{rows, total}`

use crate::config::BrowseConfig;
use crate::core::error::BrowseError;
use crate::core::response::{ApiResponse, DataBody};
use crate::core::request::BrowseRequest;
use crate::core::service::{BrowseService, EntityResolver, RowFormatter};
use crate::core::validation::{RequestValidator, ValidatedParams};
use anyhow::Result;
use serde_json::{Map, Value};
use std::sync::Arc;

/// A request that passed validation and has a resolved service
///
/// Only obtainable from [`BrowseDataEndpoint::validate`], so a rejected request
/// can never reach [`BrowseDataEndpoint::process`].
pub struct ValidatedBrowse {
    validator: RequestValidator,
    params: ValidatedParams,
    service: Arc<dyn BrowseService>,
}

impl ValidatedBrowse {
    /// Validated body, including the defaulted `sortDirection`
    pub fn data_with_defaults(&self) -> &Map<String, Value> {
        &self.params.data
    }

    /// Validated header bag, including the defaulted paging headers
    pub fn headers_with_defaults(&self) -> &Map<String, Value> {
        &self.params.headers
    }
}

/// Endpoint listing the rows of one entity
///
/// # Example
///
/// ```rust,ignore
/// let config = BrowseConfig::new("product")
///     .with_sortable_fields(["id", "name"])
///     .with_filter("id")
///     .with_filter(FilterDescriptor::with_mapper("price", MapperKind::Number));
///
/// let endpoint = BrowseDataEndpoint::new(config, Arc::new(registry))?;
/// let response = endpoint.handle(BrowseRequest::new(body)).await?;
/// ```
#[derive(Clone)]
pub struct BrowseDataEndpoint {
    config: Arc<BrowseConfig>,
    resolver: Arc<dyn EntityResolver>,
    row_formatter: Option<Arc<dyn RowFormatter>>,
}

impl BrowseDataEndpoint {
    /// Fails when the declaration does not pass [`BrowseConfig::check`]
    pub fn new(
        config: impl Into<Arc<BrowseConfig>>,
        resolver: Arc<dyn EntityResolver>,
    ) -> Result<Self> {
        let config = config.into();
        config.check()?;

        Ok(Self {
            config,
            resolver,
            row_formatter: None,
        })
    }

    /// Transform every page of rows before it is returned
    pub fn with_row_formatter(mut self, formatter: Arc<dyn RowFormatter>) -> Self {
        self.row_formatter = Some(formatter);
        self
    }

    pub fn config(&self) -> &BrowseConfig {
        &self.config
    }

    /// Validate body and headers, then resolve the entity's service
    ///
    /// Request data is always checked first, so a malformed request is
    /// reported as `INVALID_REQUEST_DATA` even when the entity is unknown.
    pub fn validate(&self, request: &BrowseRequest) -> Result<ValidatedBrowse, BrowseError> {
        let validator = RequestValidator::new(&self.config);
        let params = validator.validate(request)?;

        let service = self.resolver.resolve(&self.config.entity).map_err(|e| {
            tracing::debug!(entity = %self.config.entity, error = %e, "Entity resolution failed");
            BrowseError::invalid_entity(e)
        })?;

        Ok(ValidatedBrowse {
            validator,
            params,
            service,
        })
    }

    /// Query the service and build the `{rows, total}` response
    ///
    /// Any failure is reported as `INTERNAL_ERROR` with the original message.
    pub async fn process(
        &self,
        validated: ValidatedBrowse,
    ) -> Result<ApiResponse<DataBody>, BrowseError> {
        let body = self.fetch(&validated).await.map_err(|e| {
            tracing::warn!(entity = %self.config.entity, error = %e, "Browse processing failed");
            BrowseError::internal(e)
        })?;

        Ok(ApiResponse::ok(body))
    }

    /// `validate` followed by `process`
    pub async fn handle(&self, request: BrowseRequest) -> Result<ApiResponse<DataBody>, BrowseError> {
        let validated = self.validate(&request)?;
        self.process(validated).await
    }

    async fn fetch(&self, validated: &ValidatedBrowse) -> Result<DataBody> {
        let query = validated.validator.build_query(&validated.params)?;

        let rows = validated.service.get(&query).await?;
        let total = if rows.is_empty() {
            tracing::debug!(entity = %self.config.entity, "Empty page, skipping totals");
            0
        } else {
            validated.service.get_totals().await?
        };

        let rows = match &self.row_formatter {
            Some(formatter) => formatter.format_rows(rows).await?,
            None => rows,
        };

        Ok(DataBody { rows, total })
    }
}
