//! Response builders.
//!
//! # Design Decisions
//! - Misses are JSON bodies with an `error` field
//! - 405 responses carry an `Allow` header listing the methods that match

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::http::handler::HandlerInput;
use crate::routing::Method;

pub fn echo(status: StatusCode, input: &HandlerInput) -> Response {
    (status, Json(input)).into_response()
}

pub fn fixed(status: StatusCode, body: String) -> Response {
    (status, body).into_response()
}

pub fn not_found(path: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "no matching route", "path": path })),
    )
        .into_response()
}

pub fn method_not_allowed(allowed: &[Method]) -> Response {
    let list = allowed
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let mut response = (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "method not allowed", "allow": allowed })),
    )
        .into_response();
    if let Ok(value) = HeaderValue::from_str(&list) {
        response.headers_mut().insert(header::ALLOW, value);
    }
    response
}

pub fn not_implemented(method: &str) -> Response {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(json!({ "error": "unsupported method", "method": method })),
    )
        .into_response()
}

pub fn payload_too_large() -> Response {
    (
        StatusCode::PAYLOAD_TOO_LARGE,
        Json(json!({ "error": "request body too large" })),
    )
        .into_response()
}
