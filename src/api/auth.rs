//! Authentication: signup, login, sessions, and the current-user extractor.
//!
//! Bearer tokens are random; only their SHA-256 hash is stored. A static
//! bootstrap token from config is accepted for admin machine access and
//! compared in constant time.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{request::Parts, HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use subtle::ConstantTimeEq;

use crate::store::models::{
    AccountStatus, AuthSession, LoginRequest, LoginResponse, Role, SignupRequest,
    UpdateProfileRequest, User, UserResponse,
};
use crate::store::Store;
use crate::AppState;

use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{validate_email, validate_name, validate_password, validate_phone};

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Generate a random bearer token
fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();
    hex::encode(bytes)
}

/// Hash a token for storage
pub(crate) fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Extract the bearer token from request headers
pub(crate) fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get("Authorization").and_then(|h| h.to_str().ok()) {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            return Some(token.to_string());
        }
    }

    headers
        .get("X-API-Key")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}

fn create_session(state: &AppState, user_id: &str) -> String {
    let token = generate_token();
    let token_hash = hash_token(&token);
    let now = Utc::now();
    let expires_at = now + chrono::Duration::days(state.config.auth.session_ttl_days);

    state.store.auth_sessions.insert(
        token_hash.clone(),
        AuthSession {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            token_hash,
            expires_at,
            created_at: now,
        },
    );
    token
}

/// Resolve a token to its user. Expired sessions are dropped on sight.
pub(crate) fn current_user_for_token(state: &AppState, token: &str) -> Option<User> {
    // Bootstrap token gets a synthetic admin identity
    let bootstrap = state.config.auth.bootstrap_token.as_bytes();
    let provided = token.as_bytes();
    if bootstrap.len() == provided.len() && bool::from(bootstrap.ct_eq(provided)) {
        let now = Utc::now();
        return Some(User {
            id: "system".to_string(),
            email: "system@carelink.local".to_string(),
            password_hash: String::new(),
            name: "System Admin".to_string(),
            phone: String::new(),
            role: Role::Admin,
            specialization: None,
            bio: None,
            consultation_fee: None,
            verified: true,
            status: AccountStatus::Active,
            created_at: now,
            last_active: now,
        });
    }

    let token_hash = hash_token(token);
    let session = state.store.auth_sessions.get(&token_hash)?.clone();
    if session.expires_at <= Utc::now() {
        drop(state.store.auth_sessions.remove(&token_hash));
        return None;
    }
    state.store.users.get(&session.user_id).map(|u| u.clone())
}

/// Resolve the role carried by a request, if any. Used by the guard.
pub(crate) fn current_role(state: &AppState, headers: &HeaderMap) -> Option<Role> {
    let token = extract_token(headers)?;
    current_user_for_token(state, &token).map(|u| u.role)
}

/// Signup endpoint
///
/// POST /api/auth/signup
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if request.role == Role::Admin {
        return Err(ApiError::forbidden("Admin accounts cannot self-register"));
    }

    let mut errors = ValidationErrorBuilder::new();
    if let Err(e) = validate_email(&request.email) {
        errors.add("email", e);
    }
    if let Err(e) = validate_password(&request.password) {
        errors.add("password", e);
    }
    if let Err(e) = validate_name(&request.name) {
        errors.add("name", e);
    }
    if let Err(e) = validate_phone(&request.phone) {
        errors.add("phone", e);
    }
    errors.finish()?;

    if state.store.user_by_email(&request.email).is_some() {
        return Err(ApiError::conflict("An account with this email already exists"));
    }

    let password_hash = hash_password(&request.password)
        .map_err(|e| ApiError::internal(format!("Failed to hash password: {e}")))?;

    let now = Utc::now();
    let is_doctor = request.role == Role::Doctor;
    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        email: request.email,
        password_hash,
        name: request.name,
        phone: request.phone,
        role: request.role,
        // New doctors start unverified with a placeholder specialty
        specialization: is_doctor.then(|| "General Practice".to_string()),
        bio: None,
        consultation_fee: None,
        verified: false,
        status: AccountStatus::Active,
        created_at: now,
        last_active: now,
    };
    state.store.users.insert(user.id.clone(), user.clone());

    tracing::info!(user_id = %user.id, role = user.role.as_str(), "User signed up");

    let token = create_session(&state, &user.id);
    Ok(Json(LoginResponse {
        token,
        user: UserResponse::from(user),
    }))
}

/// Login endpoint. The request carries the role of the login screen it
/// came from; credentials for a different role are rejected.
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .store
        .user_by_email(&request.email)
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !verify_password(&request.password, &user.password_hash) {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    if user.role != request.role {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    if user.status == AccountStatus::Suspended {
        return Err(ApiError::forbidden("Account is suspended"));
    }

    if let Some(mut entry) = state.store.users.get_mut(&user.id) {
        entry.last_active = Utc::now();
    }

    let token = create_session(&state, &user.id);
    tracing::info!(user_id = %user.id, role = user.role.as_str(), "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: UserResponse::from(user),
    }))
}

/// Validate token endpoint
///
/// GET /api/auth/validate
pub async fn validate(State(state): State<Arc<AppState>>, headers: HeaderMap) -> StatusCode {
    match extract_token(&headers).and_then(|token| current_user_for_token(&state, &token)) {
        Some(_) => StatusCode::OK,
        None => StatusCode::UNAUTHORIZED,
    }
}

/// Current user endpoint
///
/// GET /api/auth/me
pub async fn me(user: User) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}

/// Partial update of the caller's own profile
///
/// PUT /api/auth/profile
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    user: User,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let mut errors = ValidationErrorBuilder::new();
    if let Some(name) = &request.name {
        if let Err(e) = validate_name(name) {
            errors.add("name", e);
        }
    }
    if let Some(phone) = &request.phone {
        if let Err(e) = validate_phone(phone) {
            errors.add("phone", e);
        }
    }
    errors.finish()?;

    let mut entry = state
        .store
        .users
        .get_mut(&user.id)
        .ok_or(ApiError::unauthorized("Unknown user"))?;
    if let Some(name) = request.name {
        entry.name = name;
    }
    if let Some(phone) = request.phone {
        entry.phone = phone;
    }
    if entry.role == Role::Doctor {
        if let Some(bio) = request.bio {
            entry.bio = Some(bio);
        }
        if let Some(specialization) = request.specialization {
            entry.specialization = Some(specialization);
        }
        if let Some(fee) = request.consultation_fee {
            entry.consultation_fee = Some(fee);
        }
    }
    let updated = entry.clone();
    drop(entry);

    Ok(Json(UserResponse::from(updated)))
}

/// Logout endpoint; removes the caller's session
///
/// POST /api/auth/logout
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> StatusCode {
    if let Some(token) = extract_token(&headers) {
        state.store.auth_sessions.remove(&hash_token(&token));
    }
    StatusCode::NO_CONTENT
}

/// Ensure the configured admin account exists (startup)
pub fn ensure_admin_user(store: &Store, email: &str, password: &str) -> anyhow::Result<()> {
    if store.has_admin() {
        return Ok(());
    }

    let password_hash =
        hash_password(password).map_err(|e| anyhow::anyhow!("password hash: {e}"))?;
    let now = Utc::now();
    let id = uuid::Uuid::new_v4().to_string();
    store.users.insert(
        id.clone(),
        User {
            id,
            email: email.to_string(),
            password_hash,
            name: "Platform Admin".to_string(),
            phone: String::new(),
            role: Role::Admin,
            specialization: None,
            bio: None,
            consultation_fee: None,
            verified: true,
            status: AccountStatus::Active,
            created_at: now,
            last_active: now,
        },
    );
    tracing::info!(email = %email, "Created admin user");
    Ok(())
}

/// Extractor for getting the current authenticated user from a request
#[async_trait]
impl FromRequestParts<Arc<AppState>> for User {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;
        current_user_for_token(state, &token)
            .ok_or_else(|| ApiError::unauthorized("Invalid or expired session"))
    }
}
