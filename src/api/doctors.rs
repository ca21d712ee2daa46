//! Patient-facing doctor directory.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::store::models::DoctorResponse;
use crate::AppState;

use super::error::ApiError;

#[derive(Debug, serde::Serialize)]
pub struct ListDoctorsResponse {
    pub doctors: Vec<DoctorResponse>,
    pub total: usize,
}

/// List the doctor directory
///
/// GET /api/doctors
pub async fn list_doctors(State(state): State<Arc<AppState>>) -> Json<ListDoctorsResponse> {
    let mut doctors: Vec<DoctorResponse> = state
        .store
        .doctors
        .iter()
        .map(|entry| DoctorResponse::from(entry.value()))
        .collect();
    doctors.sort_by(|a, b| a.name.cmp(&b.name));
    let total = doctors.len();

    Json(ListDoctorsResponse { doctors, total })
}

/// Get a single directory entry
///
/// GET /api/doctors/:id
pub async fn get_doctor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DoctorResponse>, ApiError> {
    state
        .store
        .doctors
        .get(&id)
        .map(|entry| Json(DoctorResponse::from(entry.value())))
        .ok_or_else(|| ApiError::not_found("Doctor not found"))
}
