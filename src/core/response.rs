//! Response carrier returned by the endpoints

use axum::Json;
use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of an endpoint: `{ code, body, headers, cookies }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<B> {
    pub code: u16,
    pub body: B,
    pub headers: IndexMap<String, String>,
    pub cookies: IndexMap<String, String>,
}

impl<B> ApiResponse<B> {
    /// A `200` response with no headers or cookies
    pub fn ok(body: B) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            body,
            headers: IndexMap::new(),
            cookies: IndexMap::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }
}

/// Body of the data endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataBody {
    pub rows: Vec<Value>,
    pub total: u64,
}

/// Body of the filter catalog endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiltersBody {
    pub filters: Value,
}

impl<B: Serialize> IntoResponse for ApiResponse<B> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self.body)).into_response();
        let target = response.headers_mut();

        for (name, value) in &self.headers {
            match (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    target.insert(name, value);
                }
                _ => tracing::warn!(header = %name, "Dropping response header with invalid name or value"),
            }
        }

        for (name, value) in &self.cookies {
            match HeaderValue::try_from(format!("{}={}", name, value)) {
                Ok(cookie) => {
                    target.append(header::SET_COOKIE, cookie);
                }
                Err(_) => tracing::warn!(cookie = %name, "Dropping cookie with invalid value"),
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_defaults() {
        let response = ApiResponse::ok(DataBody {
            rows: vec![],
            total: 0,
        });
        assert_eq!(response.code, 200);
        assert!(response.headers.is_empty());
        assert!(response.cookies.is_empty());
    }

    #[test]
    fn test_body_serialization() {
        let body = DataBody {
            rows: vec![json!({"id": 1})],
            total: 10,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"rows": [{"id": 1}], "total": 10})
        );
    }

    #[test]
    fn test_into_response_sets_headers_and_cookies() {
        let response = ApiResponse::ok(FiltersBody { filters: json!({}) })
            .with_header("x-total", "5")
            .with_cookie("session", "abc")
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-total"], "5");
        assert_eq!(response.headers()[header::SET_COOKIE], "session=abc");
    }

    #[test]
    fn test_into_response_skips_invalid_header() {
        let response = ApiResponse::ok(FiltersBody { filters: json!(null) })
            .with_header("bad header", "x")
            .into_response();
        assert!(response.headers().get("bad header").is_none());
    }
}
