//! Sort parameter spec

use super::ParamSpec;
use super::schema::{Rule, Schema};
use crate::core::query::{QueryParts, SortDirection};
use anyhow::Result;
use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};

pub const SORT_BY_KEY: &str = "sortBy";
pub const SORT_DIRECTION_KEY: &str = "sortDirection";

/// Validates `sortBy` against the sortable fields and `sortDirection` against `asc`/`desc`
#[derive(Debug, Clone, Default)]
pub struct SortSpec {
    fields: Vec<String>,
}

impl SortSpec {
    pub fn new(sortable_fields: &IndexSet<String>) -> Self {
        Self {
            fields: sortable_fields.iter().cloned().collect(),
        }
    }
}

impl ParamSpec for SortSpec {
    fn schema(&self) -> Schema {
        Schema::closed()
            .field(
                SORT_BY_KEY,
                Rule::OneOf {
                    allowed: self.fields.clone(),
                    ignore_case: false,
                },
            )
            .field(
                SORT_DIRECTION_KEY,
                Rule::OneOf {
                    allowed: vec![
                        SortDirection::Asc.to_string(),
                        SortDirection::Desc.to_string(),
                    ],
                    ignore_case: true,
                },
            )
    }

    /// `sortDirection` defaults to `asc`, but only when `sortBy` is given
    fn defaults(&self, input: &Map<String, Value>) -> Map<String, Value> {
        let mut defaults = Map::new();
        let has_sort_by = input.get(SORT_BY_KEY).is_some_and(|v| !v.is_null());
        if has_sort_by {
            defaults.insert(
                SORT_DIRECTION_KEY.to_string(),
                Value::String(SortDirection::Asc.to_string()),
            );
        }
        defaults
    }

    fn params(&self, validated: &Map<String, Value>) -> Result<QueryParts> {
        let Some(field) = validated.get(SORT_BY_KEY).and_then(Value::as_str) else {
            return Ok(QueryParts::default());
        };

        let direction = validated
            .get(SORT_DIRECTION_KEY)
            .and_then(Value::as_str)
            .and_then(SortDirection::parse)
            .unwrap_or_default();

        Ok(QueryParts {
            order: Some(IndexMap::from([(field.to_string(), direction)])),
            ..Default::default()
        })
    }
}
