//! Booking and visit history models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Upcoming,
    Completed,
    Cancelled,
}

/// How the consultation is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultKind {
    Video,
    Chat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientFeedback {
    pub rating: u8,
    pub comment: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub specialization: String,
    pub patient_id: String,
    pub patient_name: String,
    pub patient_phone: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: BookingStatus,
    pub kind: ConsultKind,
    pub consultation_fee: u32,
    /// Fields the doctor fills in after the visit
    pub notes: Option<String>,
    pub diagnosis: Option<String>,
    pub prescription: Option<String>,
    pub patient_feedback: Option<PatientFeedback>,
}

/// Visit history entry as the patient sees it.
#[derive(Debug, Clone, Serialize)]
pub struct PatientBookingResponse {
    pub id: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub specialization: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: BookingStatus,
    pub kind: ConsultKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prescription: Option<String>,
}

impl From<&Booking> for PatientBookingResponse {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id.clone(),
            doctor_id: booking.doctor_id.clone(),
            doctor_name: booking.doctor_name.clone(),
            specialization: booking.specialization.clone(),
            date: booking.date,
            time: booking.time.clone(),
            status: booking.status,
            kind: booking.kind,
            notes: booking.notes.clone(),
            diagnosis: booking.diagnosis.clone(),
            prescription: booking.prescription.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub doctor_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub kind: ConsultKind,
}

#[derive(Debug, Deserialize)]
pub struct ConsultNotesRequest {
    pub notes: String,
    pub diagnosis: String,
    pub prescription: String,
}

#[derive(Debug, Deserialize)]
pub struct BookingFeedbackRequest {
    pub rating: u8,
    pub comment: String,
}

/// Query filters for the doctor's booking list.
#[derive(Debug, Default, Deserialize)]
pub struct BookingFilters {
    pub status: Option<BookingStatus>,
    pub patient_name: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
