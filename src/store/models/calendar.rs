//! Doctor calendar models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Booking,
    Blocked,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub doctor_id: String,
    pub title: String,
    pub date: NaiveDate,
    pub time: String,
    pub kind: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    pub duration_minutes: u32,
}

/// A slot the doctor has blocked off from booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockedSlot {
    pub id: String,
    pub doctor_id: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BlockSlotRequest {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub events: Vec<CalendarEvent>,
    pub blocked_slots: Vec<BlockedSlot>,
}
