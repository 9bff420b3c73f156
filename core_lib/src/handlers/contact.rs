//! Contact form endpoint

use crate::{
    error::Result,
    extractors::JsonBody,
    models::{ContactResponse, SubmissionRequest},
    services::SubmissionOutcome,
    AppState,
};
use axum::{extract::State, Json};

pub async fn handle_contact(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SubmissionRequest>,
) -> Result<Json<ContactResponse>> {
    let response = match state.contact_service.submit(request).await? {
        SubmissionOutcome::Suppressed => ContactResponse::suppressed(),
        SubmissionOutcome::Delivered => ContactResponse::delivered(),
    };

    Ok(Json(response))
}
