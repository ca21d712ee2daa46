//! AI chat consultation endpoints.
//!
//! Replies come from a canned response table until a real model backend
//! is wired in; the selection is not part of the API contract.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use rand::Rng;
use std::sync::Arc;

use crate::store::models::{
    ChatExchangeResponse, ChatMessage, ChatMessageRequest, ChatSender, ChatSession,
    StartChatRequest, User,
};
use crate::AppState;

use super::error::ApiError;
use super::validation::validate_required;

const CANNED_REPLIES: &[&str] = &[
    "Based on your symptoms, I recommend getting a proper examination. Can you tell me more about when these symptoms started?",
    "Thank you for sharing that information. I'd like to suggest scheduling an appointment with one of our specialists.",
    "From what you've described, this could be related to several conditions. Let me connect you with the right doctor.",
    "I understand your concern. For a proper diagnosis, I recommend consulting with one of our specialists.",
];

const RECOMMENDATION_REPLY: &str = "Based on your symptoms, here are some doctors I recommend:\n\n\
1. **Dr. Sarah Johnson** - Cardiology (Available today)\n\
2. **Dr. Michael Chen** - Dermatology (Next available tomorrow)\n\
3. **Dr. Emily Rodriguez** - Neurology (Available this afternoon)\n\n\
Would you like me to help you book an appointment with any of these specialists?";

/// Whether the message is asking for doctor recommendations.
fn wants_recommendations(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("list of doctors") || lower.contains("doctor for my issue")
}

fn compose_reply(message: &str) -> (String, bool) {
    if wants_recommendations(message) {
        return (RECOMMENDATION_REPLY.to_string(), true);
    }
    let mut rng = rand::rng();
    let index = rng.random_range(0..CANNED_REPLIES.len());
    (CANNED_REPLIES[index].to_string(), false)
}

#[derive(Debug, serde::Serialize)]
pub struct ListChatSessionsResponse {
    pub sessions: Vec<ChatSession>,
    pub total: usize,
}

/// Start an AI consultation with a doctor persona from the directory
///
/// POST /api/chat/sessions
pub async fn start_session(
    State(state): State<Arc<AppState>>,
    user: User,
    Json(request): Json<StartChatRequest>,
) -> Result<(StatusCode, Json<ChatSession>), ApiError> {
    let doctor = state
        .store
        .doctors
        .get(&request.doctor_id)
        .map(|entry| entry.clone())
        .ok_or_else(|| ApiError::not_found("Doctor not found"))?;

    let now = Utc::now();
    let welcome = ChatMessage {
        id: uuid::Uuid::new_v4().to_string(),
        content: format!(
            "Hello! I'm AI {}, specializing in {}. How can I help you today?",
            doctor.name, doctor.specialization
        ),
        sender: ChatSender::Ai,
        timestamp: now,
        image: None,
    };

    let session = ChatSession {
        id: uuid::Uuid::new_v4().to_string(),
        patient_id: user.id,
        doctor_id: doctor.id.clone(),
        doctor_name: doctor.name.clone(),
        specialization: doctor.specialization.clone(),
        messages: vec![welcome],
        is_active: true,
        created_at: now,
    };
    state
        .store
        .chat_sessions
        .insert(session.id.clone(), session.clone());

    tracing::info!(session_id = %session.id, doctor_id = %doctor.id, "Chat session started");

    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/chat/sessions
pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
    user: User,
) -> Json<ListChatSessionsResponse> {
    let mut sessions: Vec<ChatSession> = state
        .store
        .chat_sessions
        .iter()
        .filter(|entry| entry.patient_id == user.id)
        .map(|entry| entry.clone())
        .collect();
    sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let total = sessions.len();

    Json(ListChatSessionsResponse { sessions, total })
}

/// GET /api/chat/sessions/:id
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    user: User,
    Path(id): Path<String>,
) -> Result<Json<ChatSession>, ApiError> {
    state
        .store
        .chat_sessions
        .get(&id)
        .filter(|entry| entry.patient_id == user.id)
        .map(|entry| Json(entry.clone()))
        .ok_or_else(|| ApiError::not_found("Chat session not found"))
}

/// Append a user message and the AI reply it provoked. Appends are
/// monotonic; timestamps are assigned here and never reordered.
///
/// POST /api/chat/sessions/:id/messages
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    user: User,
    Path(id): Path<String>,
    Json(request): Json<ChatMessageRequest>,
) -> Result<Json<ChatExchangeResponse>, ApiError> {
    validate_required("Message", &request.message)
        .map_err(|e| ApiError::validation_field("message", e))?;

    let mut entry = state
        .store
        .chat_sessions
        .get_mut(&id)
        .filter(|entry| entry.patient_id == user.id)
        .ok_or_else(|| ApiError::not_found("Chat session not found"))?;

    if !entry.is_active {
        return Err(ApiError::conflict("Chat session is closed"));
    }

    let user_message = ChatMessage {
        id: uuid::Uuid::new_v4().to_string(),
        content: request.message.clone(),
        sender: ChatSender::User,
        timestamp: Utc::now(),
        image: request.image,
    };
    entry.messages.push(user_message.clone());

    let (content, suggested_doctors) = compose_reply(&request.message);
    let reply = ChatMessage {
        id: uuid::Uuid::new_v4().to_string(),
        content,
        sender: ChatSender::Ai,
        timestamp: Utc::now(),
        image: None,
    };
    entry.messages.push(reply.clone());

    Ok(Json(ChatExchangeResponse {
        session_id: id,
        user_message,
        reply,
        suggested_doctors,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::seed::seed_demo_data;

    fn test_state() -> Arc<AppState> {
        let state = Arc::new(AppState::new(Config::default()));
        seed_demo_data(&state.store).unwrap();
        state
    }

    fn patient(state: &AppState) -> User {
        state.store.users.get("pat-john").unwrap().clone()
    }

    #[test]
    fn recommendation_needles_are_detected() {
        assert!(wants_recommendations("Please show me a LIST OF DOCTORS"));
        assert!(wants_recommendations("which doctor for my issue?"));
        assert!(!wants_recommendations("my head hurts"));
    }

    #[tokio::test]
    async fn session_starts_with_ai_greeting() {
        let state = test_state();
        let user = patient(&state);
        let (status, session) = start_session(
            State(state),
            user,
            Json(StartChatRequest {
                doctor_id: "doc-sarah".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert!(session.0.is_active);
        assert_eq!(session.0.messages.len(), 1);
        assert_eq!(session.0.messages[0].sender, ChatSender::Ai);
        assert!(session.0.messages[0].content.contains("Dr. Sarah Johnson"));
    }

    #[tokio::test]
    async fn messages_append_in_order() {
        let state = test_state();
        let user = patient(&state);
        let (_, session) = start_session(
            State(state.clone()),
            user.clone(),
            Json(StartChatRequest {
                doctor_id: "doc-emily".to_string(),
            }),
        )
        .await
        .unwrap();

        let exchange = send_message(
            State(state.clone()),
            user,
            Path(session.0.id.clone()),
            Json(ChatMessageRequest {
                message: "I have frequent headaches".to_string(),
                image: None,
            }),
        )
        .await
        .unwrap();

        assert!(!exchange.0.suggested_doctors);
        let stored = state.store.chat_sessions.get(&session.0.id).unwrap();
        assert_eq!(stored.messages.len(), 3);
        assert_eq!(stored.messages[1].sender, ChatSender::User);
        assert_eq!(stored.messages[2].sender, ChatSender::Ai);
        assert!(stored.messages[1].timestamp <= stored.messages[2].timestamp);
    }

    #[tokio::test]
    async fn asking_for_doctors_gets_the_recommendation_reply() {
        let state = test_state();
        let user = patient(&state);
        let (_, session) = start_session(
            State(state.clone()),
            user.clone(),
            Json(StartChatRequest {
                doctor_id: "doc-sarah".to_string(),
            }),
        )
        .await
        .unwrap();

        let exchange = send_message(
            State(state),
            user,
            Path(session.0.id.clone()),
            Json(ChatMessageRequest {
                message: "can you give me a list of doctors?".to_string(),
                image: None,
            }),
        )
        .await
        .unwrap();

        assert!(exchange.0.suggested_doctors);
        assert!(exchange.0.reply.content.contains("Dr. Sarah Johnson"));
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let state = test_state();
        let user = patient(&state);
        let result = send_message(
            State(state),
            user,
            Path("missing".to_string()),
            Json(ChatMessageRequest {
                message: "hello?".to_string(),
                image: None,
            }),
        )
        .await;
        assert!(result.is_err());
    }
}
