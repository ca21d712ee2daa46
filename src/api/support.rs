//! Support requests (bug reports, feature requests, improvements).

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::store::models::{SubmitSupportRequest, SupportRequest, SupportStatus, User};
use crate::AppState;

use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::validate_required;

#[derive(Debug, serde::Serialize)]
pub struct ListSupportResponse {
    pub requests: Vec<SupportRequest>,
    pub total: usize,
}

/// List the caller's support requests, newest first
///
/// GET /api/doctor/support
pub async fn list_requests(
    State(state): State<Arc<AppState>>,
    user: User,
) -> Json<ListSupportResponse> {
    let mut requests: Vec<SupportRequest> = state
        .store
        .support_requests
        .iter()
        .filter(|entry| entry.requester_id == user.id)
        .map(|entry| entry.clone())
        .collect();
    requests.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
    let total = requests.len();

    Json(ListSupportResponse { requests, total })
}

/// Submit a new support request; it starts in `submitted`
///
/// POST /api/doctor/support
pub async fn submit_request(
    State(state): State<Arc<AppState>>,
    user: User,
    Json(request): Json<SubmitSupportRequest>,
) -> Result<(StatusCode, Json<SupportRequest>), ApiError> {
    let mut errors = ValidationErrorBuilder::new();
    if let Err(e) = validate_required("Title", &request.title) {
        errors.add("title", e);
    }
    if let Err(e) = validate_required("Description", &request.description) {
        errors.add("description", e);
    }
    errors.finish()?;

    let today = Utc::now().date_naive();
    let record = SupportRequest {
        id: uuid::Uuid::new_v4().to_string(),
        requester_id: user.id,
        title: request.title,
        description: request.description,
        kind: request.kind,
        status: SupportStatus::Submitted,
        created_at: today,
        updated_at: today,
        response: None,
    };
    state
        .store
        .support_requests
        .insert(record.id.clone(), record.clone());

    tracing::info!(request_id = %record.id, kind = ?record.kind, "Support request submitted");

    Ok((StatusCode::CREATED, Json(record)))
}
