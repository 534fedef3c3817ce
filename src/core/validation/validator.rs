//! Two-pass request validation and query building

use super::{FilterSpec, PagingSpec, ParamSpec, SortSpec};
use crate::config::BrowseConfig;
use crate::core::error::{BrowseError, FieldViolation};
use crate::core::query::{NormalizedQuery, QueryParts};
use crate::core::request::BrowseRequest;
use anyhow::Result;
use serde_json::{Map, Value};

/// Body and headers after validation, with defaults applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedParams {
    pub data: Map<String, Value>,
    pub headers: Map<String, Value>,
}

/// Filter, sort and paging specs for one request
///
/// Built fresh per request from the endpoint's declarations.
#[derive(Debug, Clone)]
pub struct RequestValidator {
    filter: FilterSpec,
    sort: SortSpec,
    paging: PagingSpec,
}

impl RequestValidator {
    pub fn new(config: &BrowseConfig) -> Self {
        Self {
            filter: FilterSpec::new(&config.available_filters),
            sort: SortSpec::new(&config.sortable_fields),
            paging: PagingSpec::new(config.default_page_size),
        }
    }

    /// Validate the body, then the headers
    ///
    /// The body pass uses a closed schema, the header pass an open one. Either
    /// failing yields `INVALID_REQUEST_DATA` and the header pass is skipped
    /// when the body already failed.
    pub fn validate(&self, request: &BrowseRequest) -> Result<ValidatedParams, BrowseError> {
        let data = match &request.data {
            Value::Object(map) => map.clone(),
            Value::Null => Map::new(),
            other => {
                return Err(BrowseError::invalid_request_data(vec![FieldViolation::new(
                    "data",
                    other.clone(),
                    "object",
                )]));
            }
        };

        let body_schema = self.filter.schema().merge(self.sort.schema());
        let mut body_defaults = self.filter.defaults(&data);
        body_defaults.extend(self.sort.defaults(&data));

        let data = body_schema
            .validate(&data, body_defaults)
            .map_err(|violations| {
                tracing::debug!(count = violations.len(), "Request body rejected");
                BrowseError::invalid_request_data(violations)
            })?;

        let header_schema = self.paging.schema();
        let header_defaults = self.paging.defaults(&request.headers);

        let headers = header_schema
            .validate(&request.headers, header_defaults)
            .map_err(|violations| {
                tracing::debug!(count = violations.len(), "Paging headers rejected");
                BrowseError::invalid_request_data(violations)
            })?;

        Ok(ValidatedParams { data, headers })
    }

    /// Merge filter, sort and paging contributions into the normalized query
    ///
    /// Paging is merged last and owns `page` and `limit`. Fails only when a
    /// filter value mapper fails.
    pub fn build_query(&self, validated: &ValidatedParams) -> Result<NormalizedQuery> {
        let parts = QueryParts::default()
            .merge(self.filter.params(&validated.data)?)
            .merge(self.sort.params(&validated.data)?)
            .merge(self.paging.params(&validated.headers)?);

        Ok(parts.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterDescriptor;
    use crate::core::error::ErrorCode;
    use crate::core::validation::MapperKind;
    use serde_json::json;

    fn config() -> BrowseConfig {
        BrowseConfig::new("product")
            .with_sortable_fields(["foo"])
            .with_filter("id")
            .with_filter(FilterDescriptor::with_mapper("id2", MapperKind::Number))
    }

    #[test]
    fn test_empty_request_gets_defaults() {
        let validator = RequestValidator::new(&BrowseConfig::new("product"));
        let validated = validator
            .validate(&BrowseRequest::new(json!({})))
            .expect("should validate");

        assert!(validated.data.is_empty());
        assert_eq!(
            Value::Object(validated.headers),
            json!({"x-janis-page": 1, "x-janis-page-size": 60})
        );
    }

    #[test]
    fn test_null_body_is_empty() {
        let validator = RequestValidator::new(&config());
        assert!(validator.validate(&BrowseRequest::new(Value::Null)).is_ok());
    }

    #[test]
    fn test_non_object_body_rejected() {
        let validator = RequestValidator::new(&config());
        let err = validator
            .validate(&BrowseRequest::new(json!([1, 2])))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequestData);
        assert!(err.message.contains("`data`"));
    }

    #[test]
    fn test_unknown_body_key_rejected() {
        let validator = RequestValidator::new(&config());
        let err = validator
            .validate(&BrowseRequest::new(json!({"limit": 5})))
            .unwrap_err();
        assert_eq!(err.violations[0].path, "limit");
    }

    #[test]
    fn test_body_failure_reported_before_headers() {
        let validator = RequestValidator::new(&config());
        let request = BrowseRequest::new(json!({"sortBy": "bar"})).with_header("x-janis-page", -1);
        let err = validator.validate(&request).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].path, "sortBy");
    }

    #[test]
    fn test_build_query_end_to_end() {
        let validator = RequestValidator::new(&config());
        let request = BrowseRequest::new(json!({
            "filters": {"id": "10", "id2": "100"},
            "sortBy": "foo",
            "sortDirection": "DESC"
        }))
        .with_header("x-janis-page", 2)
        .with_header("x-janis-page-size", 20);

        let validated = validator.validate(&request).expect("should validate");
        let query = validator.build_query(&validated).expect("should build");

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "page": 2,
                "limit": 20,
                "order": {"foo": "desc"},
                "filters": {"id": "10", "id2": 100}
            })
        );
    }

    #[test]
    fn test_build_query_mapper_failure() {
        let validator = RequestValidator::new(&config());
        let validated = validator
            .validate(&BrowseRequest::new(json!({"filters": {"id2": "ten"}})))
            .expect("filter values are not checked during validation");
        assert!(validator.build_query(&validated).is_err());
    }
}
