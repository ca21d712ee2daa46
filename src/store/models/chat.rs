//! AI chat consultation models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    User,
    Ai,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub sender: ChatSender,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub specialization: String,
    pub messages: Vec<ChatMessage>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct StartChatRequest {
    pub doctor_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatMessageRequest {
    pub message: String,
    pub image: Option<String>,
}

/// Both sides of a chat exchange: the appended user message and the
/// AI reply generated for it.
#[derive(Debug, Serialize)]
pub struct ChatExchangeResponse {
    pub session_id: String,
    pub user_message: ChatMessage,
    pub reply: ChatMessage,
    pub suggested_doctors: bool,
}
