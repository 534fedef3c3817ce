//! Request carrier: parsed body plus the raw header bag

use axum::http::HeaderMap;
use serde_json::{Map, Value};

/// Header carrying the requested page
pub const PAGE_HEADER: &str = "x-janis-page";

/// Header carrying the requested page size
pub const PAGE_SIZE_HEADER: &str = "x-janis-page-size";

/// What a browse endpoint receives before validation
///
/// `data` is the parsed body (`filters`, `sortBy`, `sortDirection`) and
/// `headers` the header bag, keyed case-sensitively. Header values may be
/// JSON strings or numbers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowseRequest {
    pub data: Value,
    pub headers: Map<String, Value>,
}

impl BrowseRequest {
    pub fn new(data: Value) -> Self {
        Self {
            data,
            headers: Map::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: Map<String, Value>) -> Self {
        self.headers = headers;
        self
    }

    /// Build a request from an axum header map
    ///
    /// Header names come out lowercased, as `HeaderMap` stores them. Values
    /// that are not valid UTF-8 are skipped.
    pub fn from_header_map(data: Value, headers: &HeaderMap) -> Self {
        let mut bag = Map::new();
        for (name, value) in headers {
            if let Ok(value) = value.to_str() {
                bag.insert(name.as_str().to_string(), Value::String(value.to_string()));
            }
        }

        Self { data, headers: bag }
    }
}
