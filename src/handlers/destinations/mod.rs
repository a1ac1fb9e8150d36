mod create;
mod delete;
mod list;
mod show;
mod update;

pub use create::create;
pub use delete::delete;
pub use list::list;
pub use show::show;
pub use update::update;

use serde::{Deserialize, Serialize};

use crate::database::models::Destination;

/// Create payload. `type` arrives as a string so an unknown category is
/// reported as a field-level validation error rather than a decode
/// failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDestinationRequest {
    pub name: String,
    pub description: String,
    pub country_code: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Partial update payload: absent fields keep their stored values.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDestinationRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub country_code: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub country_code: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub destinations: Vec<Destination>,
    pub pagination: PaginationMeta,
}
