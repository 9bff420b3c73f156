//! Request validation middleware for content type and size limits

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Largest request body accepted, in bytes.
#[derive(Debug, Clone, Copy)]
pub struct BodyLimit(pub usize);

pub async fn request_validation_middleware(
    State(BodyLimit(max_body_bytes)): State<BodyLimit>,
    request: Request,
    next: Next,
) -> Response {
    let headers = request.headers();

    let content_length = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|cl| cl.to_str().ok())
        .and_then(|cl| cl.parse::<usize>().ok());

    if matches!(*request.method(), Method::POST | Method::PUT | Method::PATCH) {
        let has_body = content_length.map(|len| len > 0).unwrap_or(false);

        match headers.get(header::CONTENT_TYPE) {
            Some(content_type) => {
                let content_type = content_type.to_str().unwrap_or("");
                if !content_type.starts_with("application/json") {
                    return reject(
                        StatusCode::UNSUPPORTED_MEDIA_TYPE,
                        "Unsupported content type. Expected application/json".to_string(),
                    );
                }
            }
            None if has_body => {
                return reject(
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    "Missing Content-Type header. Expected application/json".to_string(),
                );
            }
            None => {}
        }
    }

    if let Some(length) = content_length {
        if length > max_body_bytes {
            return reject(
                StatusCode::PAYLOAD_TOO_LARGE,
                format!(
                    "Request body too large. Maximum size is {} bytes",
                    max_body_bytes
                ),
            );
        }
    }

    next.run(request).await
}

pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    response
}

fn reject(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
