//! Doctor directory models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoctorStatus {
    Pending,
    Approved,
    Rejected,
    Suspended,
}

/// Verification documents uploaded during onboarding. File references
/// only; nothing is stored server-side at this fidelity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DoctorDocuments {
    pub medical_license: String,
    pub degrees_certificates: Vec<String>,
    pub government_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
    pub experience: String,
    pub rating: f32,
    pub avatar: String,
    pub is_online: bool,
    pub consultation_fee: u32,
    pub next_available: DateTime<Utc>,
    pub verified: bool,
    pub status: DoctorStatus,
    pub joined_date: NaiveDate,
    pub documents: DoctorDocuments,
}

/// Patient-facing directory entry.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorResponse {
    pub id: String,
    pub name: String,
    pub specialization: String,
    pub experience: String,
    pub rating: f32,
    pub avatar: String,
    pub is_online: bool,
    pub consultation_fee: u32,
    pub next_available: DateTime<Utc>,
}

impl From<&Doctor> for DoctorResponse {
    fn from(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id.clone(),
            name: doctor.name.clone(),
            specialization: doctor.specialization.clone(),
            experience: doctor.experience.clone(),
            rating: doctor.rating,
            avatar: doctor.avatar.clone(),
            is_online: doctor.is_online,
            consultation_fee: doctor.consultation_fee,
            next_available: doctor.next_available,
        }
    }
}

/// Earnings rollup shown on the admin doctor list.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorEarningsRollup {
    pub this_month: u64,
    pub total: u64,
}

/// Admin-facing view with verification state and earnings.
#[derive(Debug, Clone, Serialize)]
pub struct AdminDoctorResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
    pub experience: String,
    pub verified: bool,
    pub consultation_fee: u32,
    pub joined_date: NaiveDate,
    pub status: DoctorStatus,
    pub documents: DoctorDocuments,
    pub earnings: DoctorEarningsRollup,
}

#[derive(Debug, Deserialize)]
pub struct CreateDoctorRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
    pub consultation_fee: u32,
}

#[derive(Debug, Deserialize)]
pub struct VerifyDoctorRequest {
    pub status: DoctorStatus,
}
