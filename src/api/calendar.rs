//! Doctor calendar: booking events and blocked slots.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::store::models::{BlockSlotRequest, BlockedSlot, CalendarEvent, CalendarResponse, User};
use crate::AppState;

use super::error::ApiError;
use super::validation::validate_time_range;

/// Fetch the caller's events and blocked slots
///
/// GET /api/doctor/calendar
pub async fn get_calendar(
    State(state): State<Arc<AppState>>,
    user: User,
) -> Json<CalendarResponse> {
    let mut events: Vec<CalendarEvent> = state
        .store
        .calendar_events
        .iter()
        .filter(|entry| entry.doctor_id == user.id)
        .map(|entry| entry.clone())
        .collect();
    events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time)));

    let mut blocked_slots: Vec<BlockedSlot> = state
        .store
        .blocked_slots
        .iter()
        .filter(|entry| entry.doctor_id == user.id)
        .map(|entry| entry.clone())
        .collect();
    blocked_slots.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.start_time.cmp(&b.start_time)));

    Json(CalendarResponse {
        events,
        blocked_slots,
    })
}

/// Block a time range off from booking
///
/// POST /api/doctor/calendar/blocks
pub async fn block_slot(
    State(state): State<Arc<AppState>>,
    user: User,
    Json(request): Json<BlockSlotRequest>,
) -> Result<(StatusCode, Json<BlockedSlot>), ApiError> {
    validate_time_range(&request.start_time, &request.end_time)
        .map_err(|e| ApiError::validation_field("start_time", e))?;

    let slot = BlockedSlot {
        id: uuid::Uuid::new_v4().to_string(),
        doctor_id: user.id,
        date: request.date,
        start_time: request.start_time,
        end_time: request.end_time,
        reason: request.reason,
    };
    state.store.blocked_slots.insert(slot.id.clone(), slot.clone());

    tracing::info!(slot_id = %slot.id, date = %slot.date, "Time slot blocked");

    Ok((StatusCode::CREATED, Json(slot)))
}

/// DELETE /api/doctor/calendar/blocks/:id
pub async fn remove_blocked_slot(
    State(state): State<Arc<AppState>>,
    user: User,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let owned = state
        .store
        .blocked_slots
        .get(&id)
        .map_or(false, |entry| entry.doctor_id == user.id);
    if !owned {
        return Err(ApiError::not_found("Blocked slot not found"));
    }
    state.store.blocked_slots.remove(&id);
    Ok(StatusCode::NO_CONTENT)
}
