//! # Browse
//!
//! Standardized "browse" (list) endpoints for microservice APIs.
//!
//! A browse endpoint validates the paging, filter and sort parameters of a
//! request, normalizes them into a single [`NormalizedQuery`](core::NormalizedQuery),
//! hands it to the [`BrowseService`](core::BrowseService) registered for the
//! endpoint's entity, and shapes the `{rows, total}` response.
//!
//! ## Features
//!
//! - **Declarative endpoints**: sortable fields and filters declared once, in code or YAML
//! - **Closed body validation**: unknown filters and body keys are rejected with field-level errors
//! - **Header paging**: `x-janis-page` / `x-janis-page-size` with defaults `1` / `60`
//! - **Value mappers**: per-filter coercion (`number`, `boolean`, `trim`, ...)
//! - **Typed errors**: `INVALID_REQUEST_DATA`, `INVALID_ENTITY`, `INTERNAL_ERROR`
//! - **Filter catalog**: a sibling endpoint listing filter values for UIs
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use browse::prelude::*;
//!
//! let registry = ServiceRegistry::new().with_service("product", Arc::new(ProductService::new()));
//!
//! let config = BrowseConfig::new("product")
//!     .with_sortable_fields(["name"])
//!     .with_filter("id")
//!     .with_filter(FilterDescriptor::with_mapper("price", MapperKind::Number));
//!
//! let endpoint = BrowseDataEndpoint::new(config, Arc::new(registry))?;
//!
//! let request = BrowseRequest::new(json!({"filters": {"price": "10"}, "sortBy": "name"}))
//!     .with_header("x-janis-page", "2");
//!
//! let response = endpoint.handle(request).await?;
//! println!("{} of {}", response.body.rows.len(), response.body.total);
//! ```

pub mod config;
pub mod core;
pub mod endpoint;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::service::{
        BrowseService, EntityResolver, FilterCatalogProvider, RowFormatter, UnimplementedCatalog,
    };

    // === Core Types ===
    pub use crate::core::{
        ApiResponse, BrowseError, BrowseRequest, DataBody, ErrorCode, FieldViolation, FiltersBody,
        NormalizedQuery, PAGE_HEADER, PAGE_SIZE_HEADER, ServiceRegistry, SortDirection,
    };

    // === Validation ===
    pub use crate::core::validation::{MapperKind, RequestValidator, ValueMapper};

    // === Config ===
    pub use crate::config::{BrowseConfig, FilterDescriptor};

    // === Endpoints ===
    pub use crate::endpoint::{
        BrowseDataEndpoint, FilterCatalogEndpoint, ValidatedBrowse, ValidatedCatalog,
    };

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde_json::{Value, json};
    pub use std::sync::Arc;
}
