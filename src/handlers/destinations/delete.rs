use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::database::destinations::DestinationRepository;
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// DELETE /api/destinations/:id - permanent removal, owner only
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Value>, ApiError> {
    let repo = DestinationRepository::new(state.pool.clone());

    let existing = repo.get(id).await?;
    if !existing.owned_by(current.id) {
        return Err(ApiError::forbidden(
            "You do not have permission to delete this destination",
        ));
    }

    repo.delete(id).await?;

    tracing::info!(destination_id = id, user_id = current.id, "destination deleted");

    Ok(Json(json!({ "message": "Destination deleted successfully" })))
}
