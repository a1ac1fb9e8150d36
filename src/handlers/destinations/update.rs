use axum::extract::{Path, State};
use axum::{Extension, Json};

use super::UpdateDestinationRequest;
use crate::database::destinations::{DestinationChanges, DestinationRepository};
use crate::database::models::Destination;
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// PUT /api/destinations/:id - partial update, owner only
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<UpdateDestinationRequest>,
) -> Result<Json<Destination>, ApiError> {
    state.validator.update_destination(&payload)?;

    let kind = payload
        .kind
        .as_deref()
        .map(|s| {
            s.parse().map_err(|_| {
                ApiError::bad_request(
                    "type must be one of: Beach, Mountain, City, Cultural, Adventure",
                )
            })
        })
        .transpose()?;

    let repo = DestinationRepository::new(state.pool.clone());

    // NotFound before Forbidden, so a non-owner probing a missing id
    // learns only that it does not exist.
    let existing = repo.get(id).await?;
    if !existing.owned_by(current.id) {
        return Err(ApiError::forbidden(
            "You do not have permission to modify this destination",
        ));
    }

    let changes = DestinationChanges {
        name: payload.name.map(|s| s.trim().to_string()),
        description: payload.description.map(|s| s.trim().to_string()),
        country_code: payload.country_code,
        kind,
    };

    let destination = repo.update(id, &changes).await?;

    tracing::info!(
        destination_id = destination.id,
        user_id = current.id,
        "destination updated"
    );

    Ok(Json(destination))
}
