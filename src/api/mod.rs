mod admin;
pub mod auth;
mod blogs;
mod bookings;
mod calendar;
mod chat;
mod consults;
mod doctors;
mod earnings;
pub mod error;
pub mod guard;
mod support;
mod validation;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/validate", get(auth::validate))
        .route("/me", get(auth::me))
        .route("/profile", put(auth::update_profile))
        .route("/logout", post(auth::logout));

    // Patient-facing routes
    let patient_routes = Router::new()
        .route("/doctors", get(doctors::list_doctors))
        .route("/doctors/:id", get(doctors::get_doctor))
        .route("/blogs", get(blogs::list_posts))
        .route("/blogs/:id", get(blogs::get_post))
        .route("/bookings", get(bookings::list_bookings))
        .route("/bookings", post(bookings::create_booking))
        .route("/bookings/:id", get(bookings::get_booking))
        .route("/bookings/:id/cancel", post(bookings::cancel_booking))
        .route("/bookings/:id/feedback", post(bookings::submit_feedback))
        .route("/chat/sessions", post(chat::start_session))
        .route("/chat/sessions", get(chat::list_sessions))
        .route("/chat/sessions/:id", get(chat::get_session))
        .route("/chat/sessions/:id/messages", post(chat::send_message))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            guard::require_patient,
        ));

    // Live consultation routes, shared by both parties of a session
    let consult_routes = Router::new()
        .route("/consults", post(consults::start_consult))
        .route("/consults/:id", get(consults::get_consult))
        .route("/consults/:id/messages", post(consults::send_message))
        .route(
            "/consults/:id/messages/:message_id/status",
            put(consults::update_message_status),
        )
        .route("/consults/:id/mode", put(consults::set_mode))
        .route("/consults/:id/typing", put(consults::set_typing))
        .route("/consults/:id/notes", put(consults::save_notes))
        .route("/consults/:id/feedback", put(consults::save_feedback))
        .route("/consults/:id/complete", post(consults::complete_consult))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            guard::require_authenticated,
        ));

    // Doctor workspace routes
    let doctor_routes = Router::new()
        .route("/bookings", get(bookings::list_doctor_bookings))
        .route("/bookings/:id/notes", put(bookings::update_consult_notes))
        .route("/calendar", get(calendar::get_calendar))
        .route("/calendar/blocks", post(calendar::block_slot))
        .route("/calendar/blocks/:id", delete(calendar::remove_blocked_slot))
        .route("/earnings", get(earnings::get_earnings))
        .route("/support", get(support::list_requests))
        .route("/support", post(support::submit_request))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            guard::require_doctor,
        ));

    // Admin routes
    let admin_routes = Router::new()
        .route("/doctors", get(admin::list_doctors))
        .route("/doctors", post(admin::create_doctor))
        .route("/doctors/:id/verify", put(admin::verify_doctor))
        .route("/users", get(admin::list_users))
        .route("/users/:id/status", put(admin::update_user_status))
        .route("/metrics", get(admin::platform_metrics))
        .route("/feedback", get(admin::list_feedback))
        .route("/feedback/:id/status", put(admin::update_feedback_status))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            guard::require_admin,
        ));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/doctor", doctor_routes)
        .nest("/admin", admin_routes)
        .merge(patient_routes)
        .merge(consult_routes);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
