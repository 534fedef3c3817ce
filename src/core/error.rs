//! Typed error handling for browse endpoints
//!
//! Every failure an endpoint reports is a [`BrowseError`] tagged with an
//! [`ErrorCode`]. There are exactly three kinds:
//!
//! - [`ErrorCode::InvalidRequestData`]: the body or the paging headers failed validation
//! - [`ErrorCode::InvalidEntity`]: the declared entity could not be resolved to a service
//! - [`ErrorCode::InternalError`]: anything that went wrong while processing
//!
//! # Example
//!
//! ```rust,ignore
//! use browse::prelude::*;
//!
//! match endpoint.handle(request).await {
//!     Ok(response) => println!("{} rows", response.body.rows.len()),
//!     Err(e) if e.code == ErrorCode::InvalidRequestData => {
//!         for violation in &e.violations {
//!             println!("bad field {}", violation.path);
//!         }
//!     }
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Kind of failure reported by an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Structural validation failure in the body or the headers
    InvalidRequestData,

    /// The declared entity has no registered service
    InvalidEntity,

    /// Failure while processing (service call, row formatting, catalog hook)
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidRequestData => "INVALID_REQUEST_DATA",
            ErrorCode::InvalidEntity => "INVALID_ENTITY",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    /// HTTP status used when the error reaches a client
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidRequestData => StatusCode::BAD_REQUEST,
            ErrorCode::InvalidEntity => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single schema violation
///
/// `expected` describes what the field accepts: a type name such as
/// `positive integer`, or an enumeration like `"asc" | "desc"`. An empty
/// enumeration is described as `undefined`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub path: String,
    pub value: Value,
    pub expected: String,
}

impl FieldViolation {
    pub fn new(path: impl Into<String>, value: Value, expected: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value,
            expected: expected.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Expected a value of type `{}` for `{}` but received `{}`.",
            self.expected, self.path, self.value
        )
    }
}

/// The error type returned by browse endpoints
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BrowseError {
    pub code: ErrorCode,
    pub message: String,
    /// Field-level details, only populated for [`ErrorCode::InvalidRequestData`]
    pub violations: Vec<FieldViolation>,
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl BrowseError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            violations: Vec::new(),
        }
    }

    /// Build an `INVALID_REQUEST_DATA` error from schema violations
    ///
    /// The message is every violation rendered in order, joined by `"; "`.
    pub fn invalid_request_data(violations: Vec<FieldViolation>) -> Self {
        let message = violations
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("; ");

        Self {
            code: ErrorCode::InvalidRequestData,
            message,
            violations,
        }
    }

    /// Wrap an entity resolution failure, keeping its message
    pub fn invalid_entity(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InvalidEntity, err.to_string())
    }

    /// Wrap a processing failure, keeping its message
    pub fn internal(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InternalError, err.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    pub fn error_code(&self) -> &'static str {
        self.code.as_str()
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        let details = if self.violations.is_empty() {
            None
        } else {
            Some(serde_json::json!({ "fields": self.violations }))
        };

        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.message.clone(),
            details,
        }
    }
}

impl IntoResponse for BrowseError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_violation_message_echoes_path_and_value() {
        let v = FieldViolation::new("x-janis-page", json!(-10), "positive integer");
        assert_eq!(
            v.to_string(),
            "Expected a value of type `positive integer` for `x-janis-page` but received `-10`."
        );
    }

    #[test]
    fn test_violation_message_quotes_strings() {
        let v = FieldViolation::new("sortBy", json!("id"), "undefined");
        let msg = v.to_string();
        assert!(msg.contains("`\"id\"`"));
        assert!(msg.contains("undefined"));
    }

    #[test]
    fn test_invalid_request_data_joins_messages() {
        let err = BrowseError::invalid_request_data(vec![
            FieldViolation::new("sortBy", json!("a"), "\"foo\""),
            FieldViolation::new("sortDirection", json!("up"), "\"asc\" | \"desc\""),
        ]);
        assert_eq!(err.code, ErrorCode::InvalidRequestData);
        assert_eq!(err.violations.len(), 2);
        assert!(err.message.contains("; "));
        assert!(err.message.contains("sortDirection"));
    }

    #[test]
    fn test_wrappers_preserve_message() {
        let err = BrowseError::internal(anyhow::anyhow!("connection reset"));
        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(err.to_string(), "connection reset");

        let err = BrowseError::invalid_entity("Unknown entity type: order");
        assert_eq!(err.code, ErrorCode::InvalidEntity);
        assert_eq!(err.message, "Unknown entity type: order");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ErrorCode::InvalidRequestData.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::InvalidEntity.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_response_details_only_for_violations() {
        let err = BrowseError::internal("boom");
        assert!(err.to_response().details.is_none());

        let err = BrowseError::invalid_request_data(vec![FieldViolation::new(
            "filters.foo",
            json!("bar"),
            "\"id\"",
        )]);
        let details = err.to_response().details.expect("details should be set");
        assert_eq!(details["fields"][0]["path"], json!("filters.foo"));
    }

    #[test]
    fn test_into_response_status() {
        let response = BrowseError::invalid_request_data(vec![]).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
