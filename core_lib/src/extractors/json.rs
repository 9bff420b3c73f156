//! JSON extractor whose rejections use the `{ "error": ... }` body shape

use axum::{
    async_trait,
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::json;

pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonBodyRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                tracing::debug!("Rejected JSON body: {}", rejection.body_text());
                Err(JsonBodyRejection::from(rejection))
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum JsonBodyRejection {
    UnsupportedMediaType,
    PayloadTooLarge,
    InvalidBody,
}

impl From<JsonRejection> for JsonBodyRejection {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => JsonBodyRejection::UnsupportedMediaType,
            other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                JsonBodyRejection::PayloadTooLarge
            }
            _ => JsonBodyRejection::InvalidBody,
        }
    }
}

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            JsonBodyRejection::UnsupportedMediaType => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Expected request with `Content-Type: application/json`",
            ),
            JsonBodyRejection::PayloadTooLarge => {
                (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
            }
            JsonBodyRejection::InvalidBody => (StatusCode::BAD_REQUEST, "Invalid request body"),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
