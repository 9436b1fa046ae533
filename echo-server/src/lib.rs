//! A request-reflecting HTTP server for exercising client transports offline.
//!
//! Every request is answered with a JSON description of itself. The status
//! code can be chosen with `?status=NNN`; `204` yields an empty body. `/raw`
//! answers with a plain-text body so decode failures can be provoked.

use axum::{
    body::Bytes,
    extract::Query,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;

/// What the server saw.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct EchoParams {
    pub status: Option<u16>,
}

pub fn app() -> Router {
    Router::new().route("/raw", any(raw)).fallback(echo)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn echo(
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<EchoParams>,
    body: Bytes,
) -> Response {
    let status = params
        .status
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::OK);

    tracing::debug!(%method, %uri, %status, "echo");

    if status == StatusCode::NO_CONTENT {
        return status.into_response();
    }

    let body = if body.is_empty() {
        None
    } else {
        match serde_json::from_slice(&body) {
            Ok(value) => Some(value),
            Err(_) => return (StatusCode::BAD_REQUEST, "request body is not JSON").into_response(),
        }
    };

    let echo = Echo {
        method: method.to_string(),
        path: uri.path().to_string(),
        authorization: header_value(&headers, header::AUTHORIZATION),
        content_type: header_value(&headers, header::CONTENT_TYPE),
        body,
    };
    (status, Json(echo)).into_response()
}

async fn raw() -> (StatusCode, &'static str) {
    (StatusCode::OK, "plain text, not json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_serializes_missing_headers_as_null() {
        let echo = Echo {
            method: "GET".to_string(),
            path: "/users".to_string(),
            authorization: None,
            content_type: None,
            body: None,
        };
        let json = serde_json::to_value(&echo).unwrap();
        assert_eq!(json["method"], "GET");
        assert!(json["authorization"].is_null());
        assert!(json["body"].is_null());
    }

    #[test]
    fn echo_params_status_is_optional() {
        let params: EchoParams = serde_json::from_str(r#"{}"#).unwrap();
        assert!(params.status.is_none());
        let params: EchoParams = serde_json::from_str(r#"{"status":422}"#).unwrap();
        assert_eq!(params.status, Some(422));
    }
}
