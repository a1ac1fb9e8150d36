use axum::extract::{Path, State};
use axum::Json;

use crate::database::destinations::DestinationRepository;
use crate::database::models::Destination;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/destinations/:id - single destination by id (public)
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Destination>, ApiError> {
    let destination = DestinationRepository::new(state.pool.clone()).get(id).await?;
    Ok(Json(destination))
}
