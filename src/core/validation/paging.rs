//! Paging parameter spec, read from the header bag

use super::ParamSpec;
use super::schema::{Rule, Schema};
use crate::core::query::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, QueryParts};
use crate::core::request::{PAGE_HEADER, PAGE_SIZE_HEADER};
use anyhow::Result;
use serde_json::{Map, Value};

/// Validates `x-janis-page` and `x-janis-page-size`
///
/// The header schema is open: unrelated headers are never rejected.
#[derive(Debug, Clone, Copy)]
pub struct PagingSpec {
    default_page_size: u64,
}

impl Default for PagingSpec {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PagingSpec {
    pub fn new(default_page_size: u64) -> Self {
        Self { default_page_size }
    }
}

impl ParamSpec for PagingSpec {
    fn schema(&self) -> Schema {
        Schema::open()
            .field(PAGE_HEADER, Rule::PositiveInteger)
            .field(PAGE_SIZE_HEADER, Rule::PositiveInteger)
    }

    fn defaults(&self, _input: &Map<String, Value>) -> Map<String, Value> {
        let mut defaults = Map::new();
        defaults.insert(PAGE_HEADER.to_string(), Value::from(DEFAULT_PAGE));
        defaults.insert(
            PAGE_SIZE_HEADER.to_string(),
            Value::from(self.default_page_size),
        );
        defaults
    }

    fn params(&self, validated: &Map<String, Value>) -> Result<QueryParts> {
        Ok(QueryParts {
            page: validated.get(PAGE_HEADER).and_then(Value::as_u64),
            limit: validated.get(PAGE_SIZE_HEADER).and_then(Value::as_u64),
            ..Default::default()
        })
    }
}
