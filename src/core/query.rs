//! Normalized query parameters handed to a [`BrowseService`](crate::core::BrowseService)

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Page used when the request does not ask for one
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when neither the request nor the config sets one
pub const DEFAULT_PAGE_SIZE: u64 = 60;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse a direction token, ignoring case
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Some(SortDirection::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(SortDirection::Desc)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The only object passed to a service's `get`
///
/// Built fresh for every request. `page` and `limit` are always at least 1,
/// `order` is only present when the request named a sort field, and every key
/// of `filters` is a declared filter.
///
/// Serialized form:
/// ```json
/// {"page": 2, "limit": 20, "order": {"foo": "desc"}, "filters": {"id": "10"}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedQuery {
    pub page: u64,
    pub limit: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<IndexMap<String, SortDirection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<IndexMap<String, Value>>,
}

impl Default for NormalizedQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_SIZE,
            order: None,
            filters: None,
        }
    }
}

/// Partial query contributed by one parameter spec
///
/// Parts are merged left to right; a later part overwrites any key an earlier
/// one set, so paging merged last always wins `page` and `limit`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParts {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub order: Option<IndexMap<String, SortDirection>>,
    pub filters: Option<IndexMap<String, Value>>,
}

impl QueryParts {
    pub fn merge(mut self, other: QueryParts) -> Self {
        if other.page.is_some() {
            self.page = other.page;
        }
        if other.limit.is_some() {
            self.limit = other.limit;
        }
        if other.order.is_some() {
            self.order = other.order;
        }
        if other.filters.is_some() {
            self.filters = other.filters;
        }
        self
    }

    /// Finish the query, falling back to the default page and page size
    pub fn build(self) -> NormalizedQuery {
        NormalizedQuery {
            page: self.page.unwrap_or(DEFAULT_PAGE).max(1),
            limit: self.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1),
            order: self.order,
            filters: self.filters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_defaults() {
        let query = QueryParts::default().build();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 60);
        assert_eq!(query, NormalizedQuery::default());
    }

    #[test]
    fn test_serialization_omits_absent_parts() {
        let query = NormalizedQuery::default();
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"page": 1, "limit": 60})
        );
    }

    #[test]
    fn test_later_parts_win() {
        let sort = QueryParts {
            order: Some(IndexMap::from([("foo".to_string(), SortDirection::Desc)])),
            ..Default::default()
        };
        let paging = QueryParts {
            page: Some(3),
            limit: Some(10),
            ..Default::default()
        };

        let query = QueryParts::default().merge(sort).merge(paging).build();
        assert_eq!(query.page, 3);
        assert_eq!(query.limit, 10);
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"page": 3, "limit": 10, "order": {"foo": "desc"}})
        );
    }

    #[test]
    fn test_sort_direction_parse_is_case_insensitive() {
        assert_eq!(SortDirection::parse("DESC"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("Asc"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::parse("up"), None);
    }

    #[test]
    fn test_build_keeps_largest_page() {
        let query = QueryParts {
            page: Some(u64::MAX),
            limit: Some(u64::MAX),
            ..Default::default()
        }
        .build();
        assert_eq!(query.page, u64::MAX);
        assert_eq!(query.limit, u64::MAX);
    }
}
