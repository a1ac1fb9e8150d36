use axum::{extract::State, Json};

use super::{AuthResponse, LoginRequest};
use crate::auth::{password, token};
use crate::database::users::UserRepository;
use crate::error::ApiError;
use crate::state::AppState;

// Shared by the missing-user and wrong-password branches so responses do
// not reveal which emails are registered.
const BAD_CREDENTIALS: &str = "Invalid email or password";

/// POST /api/auth/login - verify credentials and issue a token
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    state.validator.login(&payload)?;

    let email = payload.email.trim().to_ascii_lowercase();
    let user = UserRepository::new(state.pool.clone())
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::unauthorized(BAD_CREDENTIALS))?;

    let stored_hash = user.password.clone();
    let plaintext = payload.password;
    let matches = tokio::task::spawn_blocking(move || password::verify(&plaintext, &stored_hash))
        .await
        .map_err(|e| {
            tracing::error!("verification task failed: {}", e);
            ApiError::internal_server_error("Failed to sign in")
        })?
        .map_err(|e| {
            tracing::error!("password verification failed: {}", e);
            ApiError::internal_server_error("Failed to sign in")
        })?;

    if !matches {
        return Err(ApiError::unauthorized(BAD_CREDENTIALS));
    }

    let token = token::issue(
        user.id,
        &user.email,
        &state.config.security.jwt_secret,
        state.config.security.jwt_expiry_hours,
    )
    .map_err(|e| {
        tracing::error!("token generation failed: {}", e);
        ApiError::internal_server_error("Failed to sign in")
    })?;

    tracing::debug!(user_id = user.id, "user signed in");

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}
