use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::database::users::UserRepository;
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// GET /api/auth/me - profile of the authenticated user
///
/// Re-reads the row so the response carries current timestamps, not the
/// snapshot taken when the token was issued.
pub async fn me(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Value>, ApiError> {
    let user = UserRepository::new(state.pool.clone())
        .find_by_id(current.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let public: crate::database::models::PublicUser = user.into();
    Ok(Json(json!({ "user": public })))
}
