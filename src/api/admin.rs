//! Admin endpoints: doctor verification, platform users, metrics and
//! doctor feedback triage.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Datelike, Utc};
use std::sync::Arc;

use crate::store::models::{
    AccountStatus, AdminDoctorResponse, BookingStatus, CreateDoctorRequest, Doctor,
    DoctorDocuments, DoctorEarningsRollup, DoctorFeedback, DoctorStatus, FeedbackStatusRequest,
    Role, User, VerifyDoctorRequest,
};
use crate::store::StoreError;
use crate::AppState;

use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{validate_email, validate_name, validate_phone};

#[derive(Debug, serde::Serialize)]
pub struct ListAdminDoctorsResponse {
    pub doctors: Vec<AdminDoctorResponse>,
    pub total: usize,
}

#[derive(Debug, serde::Serialize)]
pub struct PlatformUserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
    pub joined_date: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

#[derive(Debug, serde::Serialize)]
pub struct ListPlatformUsersResponse {
    pub users: Vec<PlatformUserResponse>,
    pub total: usize,
}

#[derive(Debug, serde::Serialize)]
pub struct PlatformMetrics {
    pub total_users: usize,
    pub total_doctors: usize,
    pub total_patients: usize,
    pub active_users: usize,
    pub pending_verifications: usize,
    pub total_consultations: usize,
    pub total_revenue: u64,
    pub monthly_growth: f64,
}

#[derive(Debug, serde::Serialize)]
pub struct ListFeedbackResponse {
    pub feedbacks: Vec<DoctorFeedback>,
    pub total: usize,
}

#[derive(Debug, serde::Deserialize)]
pub struct UserStatusRequest {
    pub status: AccountStatus,
}

fn admin_doctor_view(state: &AppState, doctor: &Doctor) -> AdminDoctorResponse {
    let today = Utc::now().date_naive();
    let (total, this_month) = state.store.doctor_earnings(&doctor.id, today);
    AdminDoctorResponse {
        id: doctor.id.clone(),
        name: doctor.name.clone(),
        email: doctor.email.clone(),
        phone: doctor.phone.clone(),
        specialization: doctor.specialization.clone(),
        experience: doctor.experience.clone(),
        verified: doctor.verified,
        consultation_fee: doctor.consultation_fee,
        joined_date: doctor.joined_date,
        status: doctor.status,
        documents: doctor.documents.clone(),
        earnings: DoctorEarningsRollup { this_month, total },
    }
}

/// GET /api/admin/doctors
pub async fn list_doctors(State(state): State<Arc<AppState>>) -> Json<ListAdminDoctorsResponse> {
    let mut doctors: Vec<AdminDoctorResponse> = state
        .store
        .doctors
        .iter()
        .map(|entry| admin_doctor_view(&state, entry.value()))
        .collect();
    doctors.sort_by(|a, b| b.joined_date.cmp(&a.joined_date).then_with(|| a.id.cmp(&b.id)));
    let total = doctors.len();

    Json(ListAdminDoctorsResponse { doctors, total })
}

/// Create a doctor profile; it starts pending verification
///
/// POST /api/admin/doctors
pub async fn create_doctor(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<(StatusCode, Json<AdminDoctorResponse>), ApiError> {
    let mut errors = ValidationErrorBuilder::new();
    if let Err(e) = validate_name(&request.name) {
        errors.add("name", e);
    }
    if let Err(e) = validate_email(&request.email) {
        errors.add("email", e);
    }
    if let Err(e) = validate_phone(&request.phone) {
        errors.add("phone", e);
    }
    if request.specialization.trim().is_empty() {
        errors.add("specialization", "Specialization is required");
    }
    errors.finish()?;

    let id = uuid::Uuid::new_v4().to_string();
    let doctor = Doctor {
        id: id.clone(),
        name: request.name,
        email: request.email,
        phone: request.phone,
        specialization: request.specialization,
        experience: "0 years".to_string(),
        rating: 0.0,
        avatar: String::new(),
        is_online: false,
        consultation_fee: request.consultation_fee,
        next_available: Utc::now(),
        verified: false,
        status: DoctorStatus::Pending,
        joined_date: Utc::now().date_naive(),
        documents: DoctorDocuments::default(),
    };
    let view = admin_doctor_view(&state, &doctor);
    state.store.doctors.insert(id.clone(), doctor);

    tracing::info!(doctor_id = %id, "Doctor profile created");

    Ok((StatusCode::CREATED, Json(view)))
}

/// Approve or reject a pending doctor
///
/// PUT /api/admin/doctors/:id/verify
pub async fn verify_doctor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<VerifyDoctorRequest>,
) -> Result<Json<AdminDoctorResponse>, ApiError> {
    if !matches!(request.status, DoctorStatus::Approved | DoctorStatus::Rejected) {
        return Err(ApiError::bad_request(
            "Verification status must be approved or rejected",
        ));
    }

    let updated = {
        let mut entry = state
            .store
            .doctors
            .get_mut(&id)
            .ok_or(StoreError::NotFound("Doctor"))?;
        entry.status = request.status;
        entry.verified = request.status == DoctorStatus::Approved;
        entry.clone()
    };

    // Keep the doctor's account flag in sync, when one exists
    if let Some(mut user) = state.store.users.get_mut(&id) {
        user.verified = updated.verified;
    }

    tracing::info!(doctor_id = %id, status = ?request.status, "Doctor verification updated");

    Ok(Json(admin_doctor_view(&state, &updated)))
}

/// GET /api/admin/users
pub async fn list_users(State(state): State<Arc<AppState>>) -> Json<ListPlatformUsersResponse> {
    let mut users: Vec<PlatformUserResponse> = state
        .store
        .users
        .iter()
        .filter(|entry| entry.role != Role::Admin)
        .map(|entry| PlatformUserResponse {
            id: entry.id.clone(),
            name: entry.name.clone(),
            email: entry.email.clone(),
            role: entry.role,
            status: entry.status,
            joined_date: entry.created_at,
            last_active: entry.last_active,
        })
        .collect();
    users.sort_by(|a, b| a.name.cmp(&b.name));
    let total = users.len();

    Json(ListPlatformUsersResponse { users, total })
}

/// Suspend or reactivate a platform user
///
/// PUT /api/admin/users/:id/status
pub async fn update_user_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<UserStatusRequest>,
) -> Result<Json<PlatformUserResponse>, ApiError> {
    let mut entry = state
        .store
        .users
        .get_mut(&id)
        .ok_or(StoreError::NotFound("User"))?;
    if entry.role == Role::Admin {
        return Err(ApiError::forbidden("Admin accounts cannot be suspended"));
    }
    entry.status = request.status;
    let user: &User = &entry;

    Ok(Json(PlatformUserResponse {
        id: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role,
        status: user.status,
        joined_date: user.created_at,
        last_active: user.last_active,
    }))
}

/// Platform totals computed from the stores
///
/// GET /api/admin/metrics
pub async fn platform_metrics(State(state): State<Arc<AppState>>) -> Json<PlatformMetrics> {
    let mut total_doctors = 0usize;
    let mut total_patients = 0usize;
    let mut active_users = 0usize;
    for entry in state.store.users.iter() {
        match entry.role {
            Role::Doctor => total_doctors += 1,
            Role::Patient => total_patients += 1,
            Role::Admin => continue,
        }
        if entry.status == AccountStatus::Active {
            active_users += 1;
        }
    }

    let pending_verifications = state
        .store
        .doctors
        .iter()
        .filter(|entry| entry.status == DoctorStatus::Pending)
        .count();

    let today = Utc::now().date_naive();
    let mut total_consultations = 0usize;
    let mut total_revenue = 0u64;
    let mut this_month = 0usize;
    let mut last_month = 0usize;
    for entry in state.store.bookings.iter() {
        if entry.status != BookingStatus::Completed {
            continue;
        }
        total_consultations += 1;
        total_revenue += entry.consultation_fee as u64;

        let months = entry.date.year() * 12 + entry.date.month0() as i32;
        let current = today.year() * 12 + today.month0() as i32;
        if months == current {
            this_month += 1;
        } else if months == current - 1 {
            last_month += 1;
        }
    }
    let monthly_growth = if last_month > 0 {
        (this_month as f64 - last_month as f64) / last_month as f64 * 100.0
    } else {
        0.0
    };

    Json(PlatformMetrics {
        total_users: total_doctors + total_patients,
        total_doctors,
        total_patients,
        active_users,
        pending_verifications,
        total_consultations,
        total_revenue,
        monthly_growth,
    })
}

/// GET /api/admin/feedback
pub async fn list_feedback(State(state): State<Arc<AppState>>) -> Json<ListFeedbackResponse> {
    let mut feedbacks: Vec<DoctorFeedback> = state
        .store
        .feedback
        .iter()
        .map(|entry| entry.clone())
        .collect();
    feedbacks.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    let total = feedbacks.len();

    Json(ListFeedbackResponse { feedbacks, total })
}

/// PUT /api/admin/feedback/:id/status
pub async fn update_feedback_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<FeedbackStatusRequest>,
) -> Result<Json<DoctorFeedback>, ApiError> {
    let mut entry = state
        .store
        .feedback
        .get_mut(&id)
        .ok_or(StoreError::NotFound("Feedback"))?;
    entry.status = request.status;
    Ok(Json(entry.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::models::FeedbackStatus;
    use crate::store::seed::seed_demo_data;

    fn test_state() -> Arc<AppState> {
        let state = Arc::new(AppState::new(Config::default()));
        seed_demo_data(&state.store).unwrap();
        state
    }

    #[tokio::test]
    async fn admin_list_includes_earnings_rollup() {
        let state = test_state();
        let response = list_doctors(State(state)).await;
        assert_eq!(response.0.total, 4);
        let sarah = response
            .0
            .doctors
            .iter()
            .find(|d| d.id == "doc-sarah")
            .unwrap();
        assert_eq!(sarah.earnings.total, 300);
    }

    #[tokio::test]
    async fn verification_flips_the_verified_flag() {
        let state = test_state();

        let approved = verify_doctor(
            State(state.clone()),
            Path("doc-michael".to_string()),
            Json(VerifyDoctorRequest {
                status: DoctorStatus::Approved,
            }),
        )
        .await
        .unwrap();
        assert!(approved.0.verified);
        assert!(state.store.users.get("doc-michael").unwrap().verified);

        let rejected = verify_doctor(
            State(state.clone()),
            Path("doc-michael".to_string()),
            Json(VerifyDoctorRequest {
                status: DoctorStatus::Rejected,
            }),
        )
        .await
        .unwrap();
        assert!(!rejected.0.verified);
    }

    #[tokio::test]
    async fn verify_rejects_non_terminal_statuses() {
        let state = test_state();
        let result = verify_doctor(
            State(state),
            Path("doc-michael".to_string()),
            Json(VerifyDoctorRequest {
                status: DoctorStatus::Pending,
            }),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn verify_unknown_doctor_leaves_collection_unchanged() {
        let state = test_state();
        let before = state.store.doctors.len();
        let result = verify_doctor(
            State(state.clone()),
            Path("doc-nobody".to_string()),
            Json(VerifyDoctorRequest {
                status: DoctorStatus::Approved,
            }),
        )
        .await;
        assert!(result.is_err());
        assert_eq!(state.store.doctors.len(), before);
    }

    #[tokio::test]
    async fn created_profile_starts_pending() {
        let state = test_state();
        let (status, doctor) = create_doctor(
            State(state.clone()),
            Json(CreateDoctorRequest {
                name: "Dr. Priya Patel".to_string(),
                email: "priya.patel@carelink.local".to_string(),
                phone: "+1555000222".to_string(),
                specialization: "Pediatrics".to_string(),
                consultation_fee: 130,
            }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(doctor.0.status, DoctorStatus::Pending);
        assert!(!doctor.0.verified);
        assert_eq!(doctor.0.earnings.total, 0);
        assert!(state.store.doctors.contains_key(&doctor.0.id));
    }

    #[tokio::test]
    async fn metrics_count_roles_and_revenue() {
        let state = test_state();
        let metrics = platform_metrics(State(state)).await;
        assert_eq!(metrics.0.total_doctors, 4);
        assert_eq!(metrics.0.total_patients, 4);
        assert_eq!(metrics.0.total_users, 8);
        assert_eq!(metrics.0.pending_verifications, 1);
        // bkg-2 (120), bkg-3 (180), bkg-5 (150), bkg-6 (150)
        assert_eq!(metrics.0.total_consultations, 4);
        assert_eq!(metrics.0.total_revenue, 600);
    }

    #[tokio::test]
    async fn suspending_a_user_sticks() {
        let state = test_state();
        let updated = update_user_status(
            State(state.clone()),
            Path("pat-bob".to_string()),
            Json(UserStatusRequest {
                status: AccountStatus::Suspended,
            }),
        )
        .await
        .unwrap();
        assert_eq!(updated.0.status, AccountStatus::Suspended);
        assert_eq!(
            state.store.users.get("pat-bob").unwrap().status,
            AccountStatus::Suspended
        );
    }

    #[tokio::test]
    async fn feedback_status_update_is_in_place() {
        let state = test_state();
        let updated = update_feedback_status(
            State(state.clone()),
            Path("fbk-1".to_string()),
            Json(FeedbackStatusRequest {
                status: FeedbackStatus::Resolved,
            }),
        )
        .await
        .unwrap();
        assert_eq!(updated.0.status, FeedbackStatus::Resolved);

        let missing = update_feedback_status(
            State(state),
            Path("fbk-nope".to_string()),
            Json(FeedbackStatusRequest {
                status: FeedbackStatus::Resolved,
            }),
        )
        .await;
        assert!(missing.is_err());
    }
}
