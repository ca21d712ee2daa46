//! Live consult session models (doctor <-> patient).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ConsultKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultMode {
    Chat,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultStatus {
    Active,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultParty {
    Doctor,
    Patient,
}

/// Variant order is the delivery order; transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Delivered,
    Seen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Attachment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultMessage {
    pub id: String,
    pub content: String,
    pub sender: ConsultParty,
    pub timestamp: DateTime<Utc>,
    pub status: DeliveryStatus,
    pub kind: MessageKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultSession {
    pub id: String,
    pub doctor_id: String,
    pub patient_id: String,
    pub doctor_name: String,
    pub patient_name: String,
    pub mode: ConsultMode,
    pub status: ConsultStatus,
    pub appointment_kind: ConsultKind,
    pub messages: Vec<ConsultMessage>,
    pub doctor_notes: String,
    pub feedback: String,
    pub is_typing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typing_party: Option<ConsultParty>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct StartConsultRequest {
    pub doctor_id: String,
    pub patient_id: String,
    pub appointment_kind: ConsultKind,
}

#[derive(Debug, Deserialize)]
pub struct ConsultMessageRequest {
    pub content: String,
    pub sender: ConsultParty,
    #[serde(default = "default_message_kind")]
    pub kind: MessageKind,
    pub attachment_url: Option<String>,
    pub attachment_name: Option<String>,
}

fn default_message_kind() -> MessageKind {
    MessageKind::Text
}

#[derive(Debug, Deserialize)]
pub struct SetModeRequest {
    pub mode: ConsultMode,
}

#[derive(Debug, Deserialize)]
pub struct SetTypingRequest {
    pub is_typing: bool,
    pub party: Option<ConsultParty>,
}

#[derive(Debug, Deserialize)]
pub struct SaveNotesRequest {
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveFeedbackRequest {
    pub feedback: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageStatusRequest {
    pub status: DeliveryStatus,
}
