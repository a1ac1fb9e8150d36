use axum::{extract::State, http::StatusCode, Extension, Json};

use super::CreateDestinationRequest;
use crate::database::destinations::{DestinationRepository, NewDestination};
use crate::database::models::Destination;
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// POST /api/destinations - create a destination owned by the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<CreateDestinationRequest>,
) -> Result<(StatusCode, Json<Destination>), ApiError> {
    state.validator.create_destination(&payload)?;

    let kind = payload.kind.parse().map_err(|_| {
        ApiError::bad_request("type must be one of: Beach, Mountain, City, Cultural, Adventure")
    })?;

    let new = NewDestination {
        name: payload.name.trim().to_string(),
        description: payload.description.trim().to_string(),
        country_code: payload.country_code,
        kind,
    };

    let destination = DestinationRepository::new(state.pool.clone())
        .insert(&new, current.id)
        .await?;

    tracing::info!(
        destination_id = destination.id,
        user_id = current.id,
        "destination created"
    );

    Ok((StatusCode::CREATED, Json(destination)))
}
