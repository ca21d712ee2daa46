//! Doctor feedback models (doctors reporting issues to the platform).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Complaint,
    Suggestion,
    Compliment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeedbackStatus {
    Open,
    InProgress,
    Resolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorFeedback {
    pub id: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub kind: FeedbackKind,
    pub subject: String,
    pub message: String,
    pub date: NaiveDate,
    pub status: FeedbackStatus,
    pub priority: FeedbackPriority,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackStatusRequest {
    pub status: FeedbackStatus,
}
