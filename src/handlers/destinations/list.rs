use axum::extract::{Query, State};
use axum::Json;

use super::{ListQuery, ListResponse, PaginationMeta};
use crate::database::destinations::{DestinationRepository, ListFilter, Page};
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::is_valid_country_code;

/// GET /api/destinations - filtered, paginated listing (public)
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, ApiError> {
    let kind = query
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

    if let Some(code) = query.country_code.as_deref() {
        if !is_valid_country_code(code) {
            return Err(ApiError::bad_request(
                "countryCode must be exactly 2 uppercase letters",
            ));
        }
    }

    let filter = ListFilter {
        kind,
        country_code: query.country_code,
    };
    let page = Page::new(query.page, query.limit);

    let (destinations, total) = DestinationRepository::new(state.pool.clone())
        .list(&filter, page)
        .await?;

    Ok(Json(ListResponse {
        destinations,
        pagination: PaginationMeta {
            page: page.page,
            limit: page.limit,
            total,
            total_pages: page.total_pages(total),
        },
    }))
}
