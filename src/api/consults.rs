//! Live consult sessions between a doctor and a patient.
//!
//! One in-memory session per id; every mutation is applied synchronously
//! to that single copy. Mode can toggle freely while the session is
//! active; completion is one-directional.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::store::models::{
    ConsultMessage, ConsultMessageRequest, ConsultMode, ConsultSession, ConsultStatus,
    DeliveryStatus, MessageStatusRequest, SaveFeedbackRequest, SaveNotesRequest, SetModeRequest,
    SetTypingRequest, StartConsultRequest,
};
use crate::store::StoreError;
use crate::AppState;

use super::error::ApiError;
use super::validation::validate_required;

fn active_session<'a>(
    state: &'a AppState,
    id: &str,
) -> Result<dashmap::mapref::one::RefMut<'a, String, ConsultSession>, ApiError> {
    let entry = state
        .store
        .consults
        .get_mut(id)
        .ok_or(StoreError::NotFound("Consult session"))?;
    if entry.status == ConsultStatus::Completed {
        return Err(StoreError::InvalidTransition(
            "Consult session is already completed".to_string(),
        )
        .into());
    }
    Ok(entry)
}

/// Start a session between a doctor and a patient
///
/// POST /api/consults
pub async fn start_consult(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartConsultRequest>,
) -> Result<(StatusCode, Json<ConsultSession>), ApiError> {
    let doctor = state
        .store
        .users
        .get(&request.doctor_id)
        .map(|entry| entry.clone())
        .ok_or_else(|| ApiError::not_found("Doctor not found"))?;
    let patient = state
        .store
        .users
        .get(&request.patient_id)
        .map(|entry| entry.clone())
        .ok_or_else(|| ApiError::not_found("Patient not found"))?;

    let session = ConsultSession {
        id: uuid::Uuid::new_v4().to_string(),
        doctor_id: doctor.id.clone(),
        patient_id: patient.id.clone(),
        doctor_name: doctor.name.clone(),
        patient_name: patient.name.clone(),
        // The session opens in the mode the appointment was booked for
        mode: match request.appointment_kind {
            crate::store::models::ConsultKind::Video => ConsultMode::Video,
            crate::store::models::ConsultKind::Chat => ConsultMode::Chat,
        },
        status: ConsultStatus::Active,
        appointment_kind: request.appointment_kind,
        messages: Vec::new(),
        doctor_notes: String::new(),
        feedback: String::new(),
        is_typing: false,
        typing_party: None,
        created_at: Utc::now(),
    };
    state
        .store
        .consults
        .insert(session.id.clone(), session.clone());

    tracing::info!(session_id = %session.id, "Consult session started");

    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/consults/:id
pub async fn get_consult(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ConsultSession>, ApiError> {
    state
        .store
        .consults
        .get(&id)
        .map(|entry| Json(entry.clone()))
        .ok_or_else(|| ApiError::not_found("Consult session not found"))
}

/// Append a message; timestamps are assigned here and never reordered
///
/// POST /api/consults/:id/messages
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<ConsultMessageRequest>,
) -> Result<Json<ConsultMessage>, ApiError> {
    validate_required("Content", &request.content)
        .map_err(|e| ApiError::validation_field("content", e))?;

    let mut entry = active_session(&state, &id)?;
    let message = ConsultMessage {
        id: uuid::Uuid::new_v4().to_string(),
        content: request.content,
        sender: request.sender,
        timestamp: Utc::now(),
        status: DeliveryStatus::Sent,
        kind: request.kind,
        attachment_url: request.attachment_url,
        attachment_name: request.attachment_name,
    };
    entry.messages.push(message.clone());

    Ok(Json(message))
}

/// Advance a message's delivery status (sent -> delivered -> seen)
///
/// PUT /api/consults/:id/messages/:message_id/status
pub async fn update_message_status(
    State(state): State<Arc<AppState>>,
    Path((id, message_id)): Path<(String, String)>,
    Json(request): Json<MessageStatusRequest>,
) -> Result<Json<ConsultMessage>, ApiError> {
    let mut entry = state
        .store
        .consults
        .get_mut(&id)
        .ok_or(StoreError::NotFound("Consult session"))?;
    let message = entry
        .messages
        .iter_mut()
        .find(|m| m.id == message_id)
        .ok_or(StoreError::NotFound("Message"))?;
    if request.status <= message.status {
        return Err(StoreError::InvalidTransition(format!(
            "Delivery status only moves forward, message is already {:?}",
            message.status
        ))
        .into());
    }
    message.status = request.status;
    let updated = message.clone();

    Ok(Json(updated))
}

/// Toggle chat/video. Setting the current mode is a no-op.
///
/// PUT /api/consults/:id/mode
pub async fn set_mode(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<SetModeRequest>,
) -> Result<Json<ConsultSession>, ApiError> {
    let mut entry = active_session(&state, &id)?;
    entry.mode = request.mode;
    Ok(Json(entry.clone()))
}

/// PUT /api/consults/:id/typing
pub async fn set_typing(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<SetTypingRequest>,
) -> Result<StatusCode, ApiError> {
    let mut entry = active_session(&state, &id)?;
    entry.is_typing = request.is_typing;
    entry.typing_party = if request.is_typing { request.party } else { None };
    Ok(StatusCode::NO_CONTENT)
}

/// Autosave target for the doctor's running notes
///
/// PUT /api/consults/:id/notes
pub async fn save_notes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<SaveNotesRequest>,
) -> Result<StatusCode, ApiError> {
    let mut entry = active_session(&state, &id)?;
    entry.doctor_notes = request.notes;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/consults/:id/feedback
pub async fn save_feedback(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<SaveFeedbackRequest>,
) -> Result<StatusCode, ApiError> {
    let mut entry = active_session(&state, &id)?;
    entry.feedback = request.feedback;
    Ok(StatusCode::NO_CONTENT)
}

/// Completion is one-directional; a completed session accepts no further
/// mutation.
///
/// POST /api/consults/:id/complete
pub async fn complete_consult(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ConsultSession>, ApiError> {
    let mut entry = active_session(&state, &id)?;
    entry.status = ConsultStatus::Completed;
    entry.is_typing = false;
    entry.typing_party = None;
    Ok(Json(entry.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::models::{ConsultKind, ConsultParty, MessageKind};
    use crate::store::seed::seed_demo_data;

    fn test_state() -> Arc<AppState> {
        let state = Arc::new(AppState::new(Config::default()));
        seed_demo_data(&state.store).unwrap();
        state
    }

    async fn started_session(state: &Arc<AppState>) -> ConsultSession {
        start_consult(
            State(state.clone()),
            Json(StartConsultRequest {
                doctor_id: "doc-sarah".to_string(),
                patient_id: "pat-john".to_string(),
                appointment_kind: ConsultKind::Chat,
            }),
        )
        .await
        .unwrap()
        .1
         .0
    }

    #[tokio::test]
    async fn session_opens_active_in_booked_mode() {
        let state = test_state();
        let session = started_session(&state).await;
        assert_eq!(session.status, ConsultStatus::Active);
        assert_eq!(session.mode, ConsultMode::Chat);
        assert!(session.messages.is_empty());
    }

    #[tokio::test]
    async fn mode_toggle_is_idempotent() {
        let state = test_state();
        let session = started_session(&state).await;

        let first = set_mode(
            State(state.clone()),
            Path(session.id.clone()),
            Json(SetModeRequest {
                mode: ConsultMode::Chat,
            }),
        )
        .await
        .unwrap();
        assert_eq!(first.0.mode, ConsultMode::Chat);

        let second = set_mode(
            State(state.clone()),
            Path(session.id.clone()),
            Json(SetModeRequest {
                mode: ConsultMode::Video,
            }),
        )
        .await
        .unwrap();
        assert_eq!(second.0.mode, ConsultMode::Video);

        // Back again at will
        let third = set_mode(
            State(state),
            Path(session.id),
            Json(SetModeRequest {
                mode: ConsultMode::Chat,
            }),
        )
        .await
        .unwrap();
        assert_eq!(third.0.mode, ConsultMode::Chat);
    }

    #[tokio::test]
    async fn delivery_status_moves_forward_only() {
        let state = test_state();
        let session = started_session(&state).await;

        let message = send_message(
            State(state.clone()),
            Path(session.id.clone()),
            Json(ConsultMessageRequest {
                content: "How are you feeling today?".to_string(),
                sender: ConsultParty::Doctor,
                kind: MessageKind::Text,
                attachment_url: None,
                attachment_name: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(message.0.status, DeliveryStatus::Sent);

        let seen = update_message_status(
            State(state.clone()),
            Path((session.id.clone(), message.0.id.clone())),
            Json(MessageStatusRequest {
                status: DeliveryStatus::Seen,
            }),
        )
        .await
        .unwrap();
        assert_eq!(seen.0.status, DeliveryStatus::Seen);

        let back = update_message_status(
            State(state.clone()),
            Path((session.id.clone(), message.0.id.clone())),
            Json(MessageStatusRequest {
                status: DeliveryStatus::Sent,
            }),
        )
        .await;
        assert!(back.is_err());

        // Seen is terminal; a step back to delivered is rejected too
        let downgraded = update_message_status(
            State(state.clone()),
            Path((session.id.clone(), message.0.id.clone())),
            Json(MessageStatusRequest {
                status: DeliveryStatus::Delivered,
            }),
        )
        .await;
        assert!(downgraded.is_err());

        let stored = state.store.consults.get(&session.id).unwrap();
        assert_eq!(stored.messages[0].status, DeliveryStatus::Seen);
    }

    #[tokio::test]
    async fn completed_session_rejects_further_mutation() {
        let state = test_state();
        let session = started_session(&state).await;

        complete_consult(State(state.clone()), Path(session.id.clone()))
            .await
            .unwrap();

        let message = send_message(
            State(state.clone()),
            Path(session.id.clone()),
            Json(ConsultMessageRequest {
                content: "too late".to_string(),
                sender: ConsultParty::Patient,
                kind: MessageKind::Text,
                attachment_url: None,
                attachment_name: None,
            }),
        )
        .await;
        assert!(message.is_err());

        let mode = set_mode(
            State(state),
            Path(session.id),
            Json(SetModeRequest {
                mode: ConsultMode::Video,
            }),
        )
        .await;
        assert!(mode.is_err());
    }

    #[tokio::test]
    async fn notes_autosave_overwrites_in_place() {
        let state = test_state();
        let session = started_session(&state).await;

        for notes in ["Patient rep", "Patient reports mild chest pain"] {
            save_notes(
                State(state.clone()),
                Path(session.id.clone()),
                Json(SaveNotesRequest {
                    notes: notes.to_string(),
                }),
            )
            .await
            .unwrap();
        }

        let stored = state.store.consults.get(&session.id).unwrap();
        assert_eq!(stored.doctor_notes, "Patient reports mild chest pain");
    }

    #[tokio::test]
    async fn typing_indicator_clears_with_party() {
        let state = test_state();
        let session = started_session(&state).await;

        set_typing(
            State(state.clone()),
            Path(session.id.clone()),
            Json(SetTypingRequest {
                is_typing: true,
                party: Some(ConsultParty::Patient),
            }),
        )
        .await
        .unwrap();
        assert_eq!(
            state.store.consults.get(&session.id).unwrap().typing_party,
            Some(ConsultParty::Patient)
        );

        set_typing(
            State(state.clone()),
            Path(session.id.clone()),
            Json(SetTypingRequest {
                is_typing: false,
                party: None,
            }),
        )
        .await
        .unwrap();
        let stored = state.store.consults.get(&session.id).unwrap();
        assert!(!stored.is_typing);
        assert_eq!(stored.typing_party, None);
    }

    #[tokio::test]
    async fn unknown_session_mutations_are_not_found() {
        let state = test_state();
        let result = save_notes(
            State(state),
            Path("missing".to_string()),
            Json(SaveNotesRequest {
                notes: "x".to_string(),
            }),
        )
        .await;
        assert!(result.is_err());
    }
}
