//! Role guard for the role-prefixed route namespaces.
//!
//! The decision is a pure function of (current role, required role):
//! unauthenticated callers are sent to the required role's login entry,
//! authenticated callers of the wrong role are sent to their own home.
//! The guard itself never errors; a missing session is a handled state.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use crate::store::models::Role;
use crate::AppState;

use super::auth::current_role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

/// Where a caller with `role` lands when asked for `required`.
pub fn check(role: Option<Role>, required: Role) -> GuardDecision {
    match role {
        None => match required {
            Role::Admin => GuardDecision::Redirect("/admin"),
            _ => GuardDecision::Redirect("/login"),
        },
        Some(actual) if actual == required => GuardDecision::Allow,
        Some(Role::Admin) => GuardDecision::Redirect("/admin/dashboard"),
        Some(Role::Doctor) => GuardDecision::Redirect("/doctor/dashboard"),
        Some(Role::Patient) => GuardDecision::Redirect("/"),
    }
}

async fn require_role(
    state: Arc<AppState>,
    required: Role,
    request: Request<Body>,
    next: Next,
) -> Response {
    let role = current_role(&state, request.headers());
    match check(role, required) {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::Redirect(target) => Redirect::temporary(target).into_response(),
    }
}

pub async fn require_patient(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    require_role(state, Role::Patient, request, next).await
}

pub async fn require_doctor(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    require_role(state, Role::Doctor, request, next).await
}

pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    require_role(state, Role::Admin, request, next).await
}

/// Consult routes are shared by both sides of a session: any
/// authenticated role passes, unauthenticated callers go to login.
pub async fn require_authenticated(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match current_role(&state, request.headers()) {
        Some(_) => next.run(request).await,
        None => Redirect::temporary("/login").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_goes_to_role_login() {
        assert_eq!(
            check(None, Role::Patient),
            GuardDecision::Redirect("/login")
        );
        assert_eq!(check(None, Role::Doctor), GuardDecision::Redirect("/login"));
        assert_eq!(check(None, Role::Admin), GuardDecision::Redirect("/admin"));
    }

    #[test]
    fn matching_role_is_allowed() {
        assert_eq!(check(Some(Role::Patient), Role::Patient), GuardDecision::Allow);
        assert_eq!(check(Some(Role::Doctor), Role::Doctor), GuardDecision::Allow);
        assert_eq!(check(Some(Role::Admin), Role::Admin), GuardDecision::Allow);
    }

    #[test]
    fn doctor_on_patient_path_redirects_to_doctor_dashboard() {
        assert_eq!(
            check(Some(Role::Doctor), Role::Patient),
            GuardDecision::Redirect("/doctor/dashboard")
        );
    }

    #[test]
    fn wrong_role_goes_to_own_home() {
        assert_eq!(
            check(Some(Role::Admin), Role::Patient),
            GuardDecision::Redirect("/admin/dashboard")
        );
        assert_eq!(
            check(Some(Role::Patient), Role::Doctor),
            GuardDecision::Redirect("/")
        );
        assert_eq!(
            check(Some(Role::Patient), Role::Admin),
            GuardDecision::Redirect("/")
        );
    }

    #[test]
    fn decision_is_stable_for_same_inputs() {
        for role in [None, Some(Role::Patient), Some(Role::Doctor), Some(Role::Admin)] {
            for required in [Role::Patient, Role::Doctor, Role::Admin] {
                assert_eq!(check(role, required), check(role, required));
            }
        }
    }
}
