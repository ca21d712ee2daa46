//! Booking and visit history endpoints, patient and doctor side.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::store::models::{
    Booking, BookingFeedbackRequest, BookingFilters, BookingStatus, ConsultNotesRequest,
    CreateBookingRequest, PatientBookingResponse, PatientFeedback, User,
};
use crate::store::StoreError;
use crate::AppState;

use super::error::ApiError;
use super::validation::{validate_rating, validate_required};

#[derive(Debug, serde::Deserialize)]
pub struct StatusQuery {
    pub status: Option<BookingStatus>,
}

#[derive(Debug, serde::Serialize)]
pub struct ListBookingsResponse {
    pub bookings: Vec<PatientBookingResponse>,
    pub total: usize,
}

#[derive(Debug, serde::Serialize)]
pub struct ListDoctorBookingsResponse {
    pub bookings: Vec<Booking>,
    pub total: usize,
}

/// List the caller's visit history, newest first
///
/// GET /api/bookings?status=upcoming
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    user: User,
    Query(query): Query<StatusQuery>,
) -> Json<ListBookingsResponse> {
    let mut bookings: Vec<PatientBookingResponse> = state
        .store
        .bookings
        .iter()
        .filter(|entry| entry.patient_id == user.id)
        .filter(|entry| query.status.map_or(true, |status| entry.status == status))
        .map(|entry| PatientBookingResponse::from(entry.value()))
        .collect();
    bookings.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    let total = bookings.len();

    Json(ListBookingsResponse { bookings, total })
}

/// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    user: User,
    Path(id): Path<String>,
) -> Result<Json<PatientBookingResponse>, ApiError> {
    state
        .store
        .bookings
        .get(&id)
        .filter(|entry| entry.patient_id == user.id)
        .map(|entry| Json(PatientBookingResponse::from(entry.value())))
        .ok_or_else(|| ApiError::not_found("Booking not found"))
}

/// Book a visit with a doctor from the directory
///
/// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    user: User,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<PatientBookingResponse>), ApiError> {
    validate_required("Time", &request.time).map_err(|e| ApiError::validation_field("time", e))?;

    let doctor = state
        .store
        .doctors
        .get(&request.doctor_id)
        .map(|entry| entry.clone())
        .ok_or_else(|| ApiError::not_found("Doctor not found"))?;

    let booking = Booking {
        id: uuid::Uuid::new_v4().to_string(),
        doctor_id: doctor.id.clone(),
        doctor_name: doctor.name.clone(),
        specialization: doctor.specialization.clone(),
        patient_id: user.id.clone(),
        patient_name: user.name.clone(),
        patient_phone: user.phone.clone(),
        date: request.date,
        time: request.time,
        status: BookingStatus::Upcoming,
        kind: request.kind,
        consultation_fee: doctor.consultation_fee,
        notes: None,
        diagnosis: None,
        prescription: None,
        patient_feedback: None,
    };

    // The doctor's calendar mirrors upcoming bookings
    let event = crate::store::models::CalendarEvent {
        id: uuid::Uuid::new_v4().to_string(),
        doctor_id: doctor.id.clone(),
        title: format!("Consultation with {}", user.name),
        date: booking.date,
        time: booking.time.clone(),
        kind: crate::store::models::EventKind::Booking,
        patient_name: Some(user.name.clone()),
        duration_minutes: 30,
    };
    state.store.calendar_events.insert(event.id.clone(), event);

    let response = PatientBookingResponse::from(&booking);
    state.store.bookings.insert(booking.id.clone(), booking);

    tracing::info!(doctor_id = %doctor.id, patient_id = %user.id, "Booking created");

    Ok((StatusCode::CREATED, Json(response)))
}

/// Cancel an upcoming visit. Status transitions are one-directional;
/// completed or already-cancelled visits stay as they are.
///
/// POST /api/bookings/:id/cancel
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    user: User,
    Path(id): Path<String>,
) -> Result<Json<PatientBookingResponse>, ApiError> {
    let mut entry = state
        .store
        .bookings
        .get_mut(&id)
        .filter(|entry| entry.patient_id == user.id)
        .ok_or(StoreError::NotFound("Booking"))?;

    if entry.status != BookingStatus::Upcoming {
        return Err(StoreError::InvalidTransition(format!(
            "Only upcoming bookings can be cancelled, this one is {:?}",
            entry.status
        ))
        .into());
    }

    entry.status = BookingStatus::Cancelled;
    Ok(Json(PatientBookingResponse::from(&*entry)))
}

/// Leave feedback on a completed visit
///
/// POST /api/bookings/:id/feedback
pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    user: User,
    Path(id): Path<String>,
    Json(request): Json<BookingFeedbackRequest>,
) -> Result<Json<PatientBookingResponse>, ApiError> {
    validate_rating(request.rating).map_err(|e| ApiError::validation_field("rating", e))?;

    let mut entry = state
        .store
        .bookings
        .get_mut(&id)
        .filter(|entry| entry.patient_id == user.id)
        .ok_or(StoreError::NotFound("Booking"))?;

    if entry.status != BookingStatus::Completed {
        return Err(StoreError::InvalidTransition(
            "Feedback can only be left on completed visits".to_string(),
        )
        .into());
    }

    entry.patient_feedback = Some(PatientFeedback {
        rating: request.rating,
        comment: request.comment,
        date: Utc::now().date_naive(),
    });
    Ok(Json(PatientBookingResponse::from(&*entry)))
}

/// List the doctor's bookings with optional filters
///
/// GET /api/doctor/bookings?status=&patient_name=&from=&to=
pub async fn list_doctor_bookings(
    State(state): State<Arc<AppState>>,
    user: User,
    Query(filters): Query<BookingFilters>,
) -> Json<ListDoctorBookingsResponse> {
    let name_needle = filters
        .patient_name
        .as_deref()
        .map(|n| n.to_lowercase())
        .filter(|n| !n.is_empty());

    let mut bookings: Vec<Booking> = state
        .store
        .bookings
        .iter()
        .filter(|entry| entry.doctor_id == user.id)
        .filter(|entry| filters.status.map_or(true, |status| entry.status == status))
        .filter(|entry| {
            name_needle
                .as_deref()
                .map_or(true, |needle| entry.patient_name.to_lowercase().contains(needle))
        })
        .filter(|entry| filters.from.map_or(true, |from| entry.date >= from))
        .filter(|entry| filters.to.map_or(true, |to| entry.date <= to))
        .map(|entry| entry.clone())
        .collect();
    bookings.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    let total = bookings.len();

    Json(ListDoctorBookingsResponse { bookings, total })
}

/// Record consultation notes, diagnosis and prescription; completes the
/// visit. A mutation on an unknown id leaves the collection unchanged.
///
/// PUT /api/doctor/bookings/:id/notes
pub async fn update_consult_notes(
    State(state): State<Arc<AppState>>,
    user: User,
    Path(id): Path<String>,
    Json(request): Json<ConsultNotesRequest>,
) -> Result<Json<Booking>, ApiError> {
    let mut entry = state
        .store
        .bookings
        .get_mut(&id)
        .filter(|entry| entry.doctor_id == user.id)
        .ok_or(StoreError::NotFound("Booking"))?;

    if entry.status == BookingStatus::Cancelled {
        return Err(StoreError::InvalidTransition(
            "Cancelled bookings cannot be completed".to_string(),
        )
        .into());
    }

    entry.notes = Some(request.notes);
    entry.diagnosis = Some(request.diagnosis);
    entry.prescription = Some(request.prescription);
    entry.status = BookingStatus::Completed;

    Ok(Json(entry.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::models::{ConsultKind, Role};
    use crate::store::seed::seed_demo_data;
    use chrono::NaiveDate;

    fn test_state() -> Arc<AppState> {
        let state = Arc::new(AppState::new(Config::default()));
        seed_demo_data(&state.store).unwrap();
        state
    }

    fn seeded_user(state: &AppState, id: &str) -> User {
        state.store.users.get(id).unwrap().clone()
    }

    fn bare_booking(id: &str, patient_id: &str, status: BookingStatus) -> Booking {
        Booking {
            id: id.to_string(),
            doctor_id: "doc-sarah".to_string(),
            doctor_name: "Dr. Sarah Johnson".to_string(),
            specialization: "Cardiology".to_string(),
            patient_id: patient_id.to_string(),
            patient_name: "Test Patient".to_string(),
            patient_phone: "+1555000111".to_string(),
            date: "2024-01-20".parse::<NaiveDate>().unwrap(),
            time: "10:00 AM".to_string(),
            status,
            kind: ConsultKind::Video,
            consultation_fee: 150,
            notes: None,
            diagnosis: None,
            prescription: None,
            patient_feedback: None,
        }
    }

    #[tokio::test]
    async fn status_filter_selects_matching_records() {
        // Three records, one completed: filtering by upcoming yields two.
        let state = Arc::new(AppState::new(Config::default()));
        let user = User {
            id: "pat-test".to_string(),
            email: "t@carelink.local".to_string(),
            password_hash: String::new(),
            name: "Test Patient".to_string(),
            phone: String::new(),
            role: Role::Patient,
            specialization: None,
            bio: None,
            consultation_fee: None,
            verified: false,
            status: crate::store::models::AccountStatus::Active,
            created_at: Utc::now(),
            last_active: Utc::now(),
        };
        for (id, status) in [
            ("b1", BookingStatus::Upcoming),
            ("b2", BookingStatus::Upcoming),
            ("b3", BookingStatus::Completed),
        ] {
            state
                .store
                .bookings
                .insert(id.to_string(), bare_booking(id, "pat-test", status));
        }

        let all = list_bookings(
            State(state.clone()),
            user.clone(),
            Query(StatusQuery { status: None }),
        )
        .await;
        assert_eq!(all.0.total, 3);

        let upcoming = list_bookings(
            State(state),
            user,
            Query(StatusQuery {
                status: Some(BookingStatus::Upcoming),
            }),
        )
        .await;
        assert_eq!(upcoming.0.total, 2);
    }

    #[tokio::test]
    async fn notes_mutation_on_unknown_id_leaves_collection_unchanged() {
        let state = test_state();
        let doctor = seeded_user(&state, "doc-sarah");
        let before: Vec<Booking> = state
            .store
            .bookings
            .iter()
            .map(|e| e.clone())
            .collect();

        let result = update_consult_notes(
            State(state.clone()),
            doctor,
            Path("bkg-nope".to_string()),
            Json(ConsultNotesRequest {
                notes: "n".to_string(),
                diagnosis: "d".to_string(),
                prescription: "p".to_string(),
            }),
        )
        .await;
        assert!(result.is_err());

        let after: Vec<Booking> = state
            .store
            .bookings
            .iter()
            .map(|e| e.clone())
            .collect();
        assert_eq!(before.len(), after.len());
        for booking in &before {
            let unchanged = after.iter().find(|b| b.id == booking.id).unwrap();
            assert_eq!(unchanged.status, booking.status);
            assert_eq!(unchanged.notes, booking.notes);
        }
    }

    #[tokio::test]
    async fn consult_notes_complete_the_visit() {
        let state = test_state();
        let doctor = seeded_user(&state, "doc-sarah");

        let response = update_consult_notes(
            State(state.clone()),
            doctor,
            Path("bkg-1".to_string()),
            Json(ConsultNotesRequest {
                notes: "BP stable".to_string(),
                diagnosis: "Mild hypertension".to_string(),
                prescription: "Lifestyle changes".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0.status, BookingStatus::Completed);
        assert_eq!(
            state.store.bookings.get("bkg-1").unwrap().status,
            BookingStatus::Completed
        );
    }

    #[tokio::test]
    async fn cancel_is_one_directional() {
        let state = test_state();
        let patient = seeded_user(&state, "pat-john");

        // bkg-2 is already completed
        let result = cancel_booking(State(state.clone()), patient.clone(), Path("bkg-2".to_string())).await;
        assert!(result.is_err());

        // bkg-1 is upcoming and cancels fine, but only once
        let cancelled = cancel_booking(State(state.clone()), patient.clone(), Path("bkg-1".to_string()))
            .await
            .unwrap();
        assert_eq!(cancelled.0.status, BookingStatus::Cancelled);
        let again = cancel_booking(State(state), patient, Path("bkg-1".to_string())).await;
        assert!(again.is_err());
    }

    #[tokio::test]
    async fn booking_creation_copies_directory_fields() {
        let state = test_state();
        let patient = seeded_user(&state, "pat-john");

        let (status, response) = create_booking(
            State(state.clone()),
            patient,
            Json(CreateBookingRequest {
                doctor_id: "doc-emily".to_string(),
                date: "2024-02-01".parse().unwrap(),
                time: "11:00 AM".to_string(),
                kind: ConsultKind::Chat,
            }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(response.0.doctor_name, "Dr. Emily Rodriguez");
        assert_eq!(response.0.status, BookingStatus::Upcoming);
        assert!(state.store.bookings.contains_key(&response.0.id));
    }

    #[tokio::test]
    async fn doctor_filters_by_patient_name() {
        let state = test_state();
        let doctor = seeded_user(&state, "doc-sarah");

        let response = list_doctor_bookings(
            State(state),
            doctor,
            Query(BookingFilters {
                status: None,
                patient_name: Some("bob".to_string()),
                from: None,
                to: None,
            }),
        )
        .await;

        assert_eq!(response.0.total, 1);
        assert_eq!(response.0.bookings[0].patient_name, "Bob Smith");
    }
}
