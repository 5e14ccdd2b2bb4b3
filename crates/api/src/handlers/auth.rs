//! Handlers for the `/auth` resource (signup, login, refresh, logout, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::roles::ROLE_STUDENT;
use campus_core::types::DbId;
use campus_core::validation::{require_non_empty, validate_signup};
use campus_db::models::profile::{CreateProfile, Profile, ProfileResponse};
use campus_db::models::session::CreateSession;
use campus_db::repositories::{ProfileRepo, SessionRepo};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, verify_dummy, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Consecutive failed logins before the account is locked.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Lock duration after too many failures.
const LOCK_DURATION_MINS: i64 = 15;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: String,
    pub category_id: Option<DbId>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMeRequest {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Returned by signup, login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: ProfileResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Create a `student` profile and sign it in. Form validation happens
/// before any database call.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    validate_signup(
        &input.email,
        &input.full_name,
        &input.password,
        &input.confirm_password,
    )?;

    let email = normalize_email(&input.email);
    if ProfileRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "An account with this email already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let profile = ProfileRepo::create(
        &state.pool,
        &CreateProfile {
            email,
            password_hash,
            full_name: input.full_name.trim().to_string(),
            role: ROLE_STUDENT.to_string(),
            category_id: input.category_id,
        },
    )
    .await?;

    tracing::info!(user_id = profile.id, "Profile signed up");

    let response = create_auth_response(&state, &profile).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    require_non_empty("Email", &input.email)?;
    require_non_empty("Password", &input.password)?;

    let Some(profile) =
        ProfileRepo::find_by_email(&state.pool, &normalize_email(&input.email)).await?
    else {
        verify_dummy(&input.password);
        return Err(invalid_credentials());
    };

    if !profile.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    if let Some(locked_until) = profile.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }

    let password_valid = verify_password(&input.password, &profile.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        let failures = ProfileRepo::increment_failed_login(&state.pool, profile.id).await?;
        if failures >= MAX_FAILED_ATTEMPTS {
            let lock_until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
            ProfileRepo::lock_account(&state.pool, profile.id, lock_until).await?;
            tracing::warn!(user_id = profile.id, "Account locked after repeated failures");
        }
        return Err(invalid_credentials());
    }

    ProfileRepo::record_successful_login(&state.pool, profile.id).await?;

    Ok(Json(create_auth_response(&state, &profile).await?))
}

/// POST /api/v1/auth/refresh
///
/// Rotate a refresh token: the old session is revoked, a new one issued.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::consume(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let profile = ProfileRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !profile.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    Ok(Json(create_auth_response(&state, &profile).await?))
}

/// POST /api/v1/auth/logout
///
/// Always answers 204. A missing token or a failed revoke is only logged.
pub async fn logout(
    auth_user: Result<AuthUser, AppError>,
    State(state): State<AppState>,
) -> StatusCode {
    match auth_user {
        Ok(user) => {
            if let Err(e) = SessionRepo::revoke_all_for_user(&state.pool, user.user_id).await {
                tracing::debug!(user_id = user.user_id, error = %e, "Sign-out revoke failed");
            }
        }
        Err(e) => tracing::debug!(error = %e, "Sign-out without a valid token"),
    }
    StatusCode::NO_CONTENT
}

/// GET /api/v1/auth/me
pub async fn me(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let profile = load_profile(&state, user.user_id).await?;
    Ok(Json(DataResponse {
        data: ProfileResponse::from(&profile),
    }))
}

/// PUT /api/v1/auth/me
///
/// Update the caller's display name and avatar.
pub async fn update_me(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateMeRequest>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    if let Some(name) = &input.full_name {
        require_non_empty("Full name", name)?;
    }
    let profile = ProfileRepo::update_details(
        &state.pool,
        user.user_id,
        input.full_name.as_deref().map(str::trim),
        input.avatar_url.as_deref(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Profile",
        id: user.user_id,
    }))?;

    Ok(Json(DataResponse {
        data: ProfileResponse::from(&profile),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

async fn load_profile(state: &AppState, id: DbId) -> AppResult<Profile> {
    ProfileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id,
        }))
}

/// Issue an access token, persist a refresh session and build the response.
async fn create_auth_response(state: &AppState, profile: &Profile) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(profile.id, &profile.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: profile.id,
            refresh_token_hash: refresh_hash,
            expires_at,
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: ProfileResponse::from(profile),
    })
}
