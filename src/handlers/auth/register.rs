use axum::{extract::State, http::StatusCode, Json};

use super::{AuthResponse, RegisterRequest};
use crate::auth::{password, token};
use crate::database::users::UserRepository;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/auth/register - create an account and sign the user in
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    state.validator.register(&payload)?;

    let email = payload.email.trim().to_ascii_lowercase();
    let users = UserRepository::new(state.pool.clone());

    if users.find_by_email(&email).await?.is_some() {
        return Err(ApiError::conflict("Email is already registered"));
    }

    // bcrypt is CPU-bound; hash off the async runtime.
    let cost = state.config.security.bcrypt_cost;
    let plaintext = payload.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || password::hash(&plaintext, cost))
        .await
        .map_err(|e| {
            tracing::error!("hashing task failed: {}", e);
            ApiError::internal_server_error("Failed to register user")
        })?
        .map_err(|e| {
            tracing::error!("password hashing failed: {}", e);
            ApiError::internal_server_error("Failed to register user")
        })?;

    let user = users
        .insert(&email, &password_hash, payload.name.trim())
        .await?;

    let token = token::issue(
        user.id,
        &user.email,
        &state.config.security.jwt_secret,
        state.config.security.jwt_expiry_hours,
    )
    .map_err(|e| {
        tracing::error!("token generation failed: {}", e);
        ApiError::internal_server_error("Failed to register user")
    })?;

    tracing::info!(user_id = user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}
