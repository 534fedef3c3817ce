//! Core module containing the types, traits and validation of browse requests

pub mod error;
pub mod query;
pub mod registry;
pub mod request;
pub mod response;
pub mod service;
pub mod validation;

pub use error::{BrowseError, ErrorCode, ErrorResponse, FieldViolation};
pub use query::{NormalizedQuery, QueryParts, SortDirection};
pub use registry::ServiceRegistry;
pub use request::{BrowseRequest, PAGE_HEADER, PAGE_SIZE_HEADER};
pub use response::{ApiResponse, DataBody, FiltersBody};
pub use service::{BrowseService, EntityResolver, FilterCatalogProvider, RowFormatter};
