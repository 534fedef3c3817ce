//! Browse endpoints
//!
//! Both endpoints follow the same lifecycle: `validate` either rejects the
//! request or yields a validated value, and only that value can be passed to
//! `process`. Each call handles exactly one request; nothing is shared
//! between requests except the endpoint's declarations.

pub mod data;
pub mod filters;

pub use data::{BrowseDataEndpoint, ValidatedBrowse};
pub use filters::{FilterCatalogEndpoint, ValidatedCatalog};
