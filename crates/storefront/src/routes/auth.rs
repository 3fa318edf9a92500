//! Authentication route handlers.
//!
//! Handles sign-up, login, logout, the current-session probe, and the
//! password reset flow. Successful login/registration writes the user into
//! the session cookie.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_sessions::Session;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::services::auth::AuthService;
use crate::state::AppState;

// =============================================================================
// Payload Types
// =============================================================================

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// Forgot password request body.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordPayload {
    pub email: String,
}

/// Reset password request body.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordPayload {
    pub token: String,
    pub password: String,
    pub confirm_password: String,
}

/// User fields exposed over the API.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_owned(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Create an account and sign the new user in.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    let auth = AuthService::new(state.pool());
    let user = auth
        .register(
            &payload.name,
            &payload.email,
            &payload.password,
            &payload.confirm_password,
        )
        .await?;

    establish_session(&session, &user).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// Sign in with email and password.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    let auth = AuthService::new(state.pool());
    let user = auth.login(&payload.email, &payload.password).await?;

    establish_session(&session, &user).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// Sign out, destroying the session.
pub async fn logout(session: Session) -> Result<impl IntoResponse> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;
    clear_sentry_user();

    Ok(Json(json!({ "message": "Signed out" })))
}

/// Return the signed-in user, or 401.
pub async fn me(RequireAuth(user): RequireAuth) -> Json<serde_json::Value> {
    Json(json!({ "id": user.id, "email": user.email }))
}

/// Start the password reset flow.
///
/// The response is the same whether or not the address has an account.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordPayload>,
) -> Result<impl IntoResponse> {
    let auth = AuthService::new(state.pool());
    auth.request_password_reset(&payload.email, state.mailer(), &state.config().base_url)
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({
            "message": "If an account exists for that address, a reset link is on its way"
        })),
    ))
}

/// Complete the password reset flow with a token.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordPayload>,
) -> Result<impl IntoResponse> {
    let auth = AuthService::new(state.pool());
    auth.reset_password(&payload.token, &payload.password, &payload.confirm_password)
        .await?;

    Ok(Json(json!({ "message": "Password updated, you can sign in now" })))
}

/// Write the user into the session and tag Sentry events with them.
async fn establish_session(session: &Session, user: &User) -> Result<()> {
    // Rotate the session ID on privilege change
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("failed to cycle session: {e}")))?;

    let current = CurrentUser {
        id: user.id,
        email: user.email.as_str().to_owned(),
    };
    set_current_user(session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("failed to establish session: {e}")))?;

    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(())
}
