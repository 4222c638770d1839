// src/logging_middleware.rs
//! Middleware for logging request and response bodies in debug mode
//!
//! Bodies on this service carry passwords and bearer tokens; sensitive
//! fields are masked before anything reaches the log stream.

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// JSON keys whose values are never logged
const REDACTED_FIELDS: &[&str] = &[
    "password",
    "token",
    "id_token",
    "access_token",
    "refresh_token",
];

/// Middleware to log request and response bodies in debug mode
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    let (parts, body) = request.into_parts();

    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if !bytes.is_empty() {
        debug!(
            method = %parts.method,
            uri = %parts.uri,
            request_body = %render_redacted(&bytes),
            "📥 Request"
        );
    }

    let request = Request::from_parts(parts, Body::from(bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();

    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if !bytes.is_empty() {
        debug!(
            status = %parts.status,
            response_body = %render_redacted(&bytes),
            "📤 Response"
        );
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

/// Renders a body for logging: sensitive fields masked when it parses as
/// JSON, a length marker when it does not.
fn render_redacted(bytes: &[u8]) -> String {
    match serde_json::from_slice::<serde_json::Value>(bytes) {
        Ok(mut json) => {
            redact(&mut json);
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| "<unprintable>".to_string())
        }
        Err(_) => format!("<{} non-JSON bytes>", bytes.len()),
    }
}

fn redact(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, entry) in map.iter_mut() {
                if REDACTED_FIELDS.contains(&key.as_str()) {
                    *entry = serde_json::Value::String("***".to_string());
                } else {
                    redact(entry);
                }
            }
        }
        serde_json::Value::Array(items) => {
            for item in items.iter_mut() {
                redact(item);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_masks_sensitive_fields_recursively() {
        let mut json = serde_json::json!({
            "email": "a@x.com",
            "password": "hunter42",
            "nested": { "token": "eyJabc", "keep": 1 },
            "list": [{ "id_token": "abc" }]
        });

        redact(&mut json);

        assert_eq!(json["password"], "***");
        assert_eq!(json["nested"]["token"], "***");
        assert_eq!(json["list"][0]["id_token"], "***");
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["nested"]["keep"], 1);
    }

    #[test]
    fn test_non_json_bodies_are_not_echoed() {
        let rendered = render_redacted(b"password=hunter42");
        assert!(!rendered.contains("hunter42"));
    }
}
