use axum::{
    Json,
    extract::rejection::{FormRejection, JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

use crate::{core::MappingError, models::MissingField, ports::upstream::UpstreamError};

/// Result type alias for inbound handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Everything a handler can fail with, mapped onto an HTTP status.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed inbound input; rejected before any upstream call.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    NotFound(#[from] MappingError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl From<MissingField> for ApiError {
    fn from(e: MissingField) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(message) => error_body(StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(e) => error_body(StatusCode::NOT_FOUND, e.to_string()),
            ApiError::Upstream(UpstreamError::Status { status, body }) => {
                tracing::warn!("Upstream answered {}, relaying to caller", status);
                relay(status, &body)
            }
            ApiError::Upstream(UpstreamError::Decoding {
                status,
                body,
                source,
            }) => {
                tracing::warn!("Upstream body did not match the expected shape: {}", source);
                relay(status, &body)
            }
            ApiError::Upstream(e) => {
                tracing::error!("Upstream call failed: {}", e);
                error_body(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}

fn error_body(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Pass an upstream reply through: JSON bodies as-is, anything else wrapped.
pub fn relay(status: StatusCode, body: &[u8]) -> Response {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => (status, Json(value)).into_response(),
        Err(_) => error_body(status, String::from_utf8_lossy(body).into_owned()),
    }
}

/// Parse a numeric path identifier.
pub fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::Validation(format!("invalid id '{raw}'")))
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::Method;
    use http_body_util::BodyExt;

    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_is_bad_request() {
        let response = ApiError::Validation("field 'name' is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "field 'name' is required");
    }

    #[tokio::test]
    async fn test_not_found() {
        let response = ApiError::from(MappingError::NotFound("x.example".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_upstream_status_is_relayed_verbatim() {
        let response = ApiError::from(UpstreamError::Status {
            status: StatusCode::CONFLICT,
            body: Bytes::from_static(br#"{"status_code":0,"response":"exists"}"#),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(response).await["response"], "exists");
    }

    #[tokio::test]
    async fn test_non_json_upstream_body_is_wrapped() {
        let response = relay(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(response).await["error"], "<html>bad gateway</html>");
    }

    #[tokio::test]
    async fn test_transport_failure_is_internal_error() {
        let response = ApiError::from(UpstreamError::Transport {
            method: Method::GET,
            url: "https://api.test/v1/domain".into(),
            attempts: 4,
            message: "connection refused".into(),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("connection refused"));
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("abc"), Err(ApiError::Validation(_))));
    }
}
