//! Support request models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportKind {
    Bug,
    Feature,
    Improvement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SupportStatus {
    Submitted,
    UnderReview,
    Resolved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportRequest {
    pub id: String,
    pub requester_id: String,
    pub title: String,
    pub description: String,
    pub kind: SupportKind,
    pub status: SupportStatus,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitSupportRequest {
    pub title: String,
    pub description: String,
    pub kind: SupportKind,
}
