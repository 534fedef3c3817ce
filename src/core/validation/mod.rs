//! Request parameter validation
//!
//! Each parameter family (filters, sort, paging) is a [`ParamSpec`]: it
//! contributes a [`Schema`], computes defaults for a given input, and turns a
//! validated input into a [`QueryParts`]. The [`RequestValidator`] composes the
//! three into the body pass and the header pass.

pub mod filter;
pub mod mappers;
pub mod paging;
pub mod schema;
pub mod sort;
pub mod validator;

use crate::core::query::QueryParts;
use anyhow::Result;
use serde_json::{Map, Value};

pub use filter::{FilterDescriptor, FilterSpec};
pub use mappers::{MapperKind, ValueMapper};
pub use paging::PagingSpec;
pub use schema::{Rule, Schema, SchemaMode};
pub use sort::SortSpec;
pub use validator::{RequestValidator, ValidatedParams};

/// One family of request parameters
pub trait ParamSpec {
    /// Fields this spec accepts and how each is checked
    fn schema(&self) -> Schema;

    /// Values filled in before validation when the input lacks them
    fn defaults(&self, _input: &Map<String, Value>) -> Map<String, Value> {
        Map::new()
    }

    /// Contribution to the normalized query, from already validated input
    fn params(&self, validated: &Map<String, Value>) -> Result<QueryParts>;
}
