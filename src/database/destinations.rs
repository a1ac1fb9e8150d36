use sqlx::{PgPool, Postgres, QueryBuilder};

use super::models::{Destination, DestinationType};
use super::DatabaseError;

const DESTINATION_COLUMNS: &str =
    "id, name, description, country_code, kind, last_modif, user_id, created_at, updated_at";

/// Optional exact-match filters for the listing endpoint.
#[derive(Debug, Default, Clone)]
pub struct ListFilter {
    pub kind: Option<DestinationType>,
    pub country_code: Option<String>,
}

/// Normalized offset pagination: 1-based page, limit defaulting to 10 and
/// capped at 100. Non-positive input falls back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    pub const DEFAULT_LIMIT: i64 = 10;
    pub const MAX_LIMIT: i64 = 100;

    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.filter(|p| *p >= 1).unwrap_or(1);
        let limit = limit
            .filter(|l| *l >= 1)
            .unwrap_or(Self::DEFAULT_LIMIT)
            .min(Self::MAX_LIMIT);
        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    /// ceil(total / limit)
    pub fn total_pages(&self, total: i64) -> i64 {
        (total + self.limit - 1) / self.limit
    }
}

/// New destination fields, validated at the boundary before reaching here.
#[derive(Debug, Clone)]
pub struct NewDestination {
    pub name: String,
    pub description: String,
    pub country_code: String,
    pub kind: DestinationType,
}

/// Partial update: absent fields retain their prior values.
#[derive(Debug, Default, Clone)]
pub struct DestinationChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub country_code: Option<String>,
    pub kind: Option<DestinationType>,
}

pub struct DestinationRepository {
    pool: PgPool,
}

impl DestinationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Filtered, paginated listing ordered by creation time, most recent
    /// first. Returns the page of records plus the total row count for
    /// the same filters.
    pub async fn list(
        &self,
        filter: &ListFilter,
        page: Page,
    ) -> Result<(Vec<Destination>, i64), DatabaseError> {
        let mut query = QueryBuilder::new(format!(
            "SELECT {DESTINATION_COLUMNS} FROM destinations"
        ));
        apply_filters(&mut query, filter);
        query
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = query
            .build_query_as::<Destination>()
            .fetch_all(&self.pool)
            .await?;

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM destinations");
        apply_filters(&mut count, filter);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        Ok((rows, total))
    }

    pub async fn get(&self, id: i32) -> Result<Destination, DatabaseError> {
        let sql = format!("SELECT {DESTINATION_COLUMNS} FROM destinations WHERE id = $1");

        sqlx::query_as::<_, Destination>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound("Destination not found".to_string()))
    }

    pub async fn insert(
        &self,
        new: &NewDestination,
        owner_id: i32,
    ) -> Result<Destination, DatabaseError> {
        let sql = format!(
            "INSERT INTO destinations (name, description, country_code, kind, user_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {DESTINATION_COLUMNS}"
        );

        Ok(sqlx::query_as::<_, Destination>(&sql)
            .bind(&new.name)
            .bind(&new.description)
            .bind(&new.country_code)
            .bind(new.kind)
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?)
    }

    /// Apply the provided fields, leaving the rest untouched, and refresh
    /// the last-modified timestamp. The single UPDATE is the atomic unit;
    /// concurrent updates resolve last-write-wins.
    pub async fn update(
        &self,
        id: i32,
        changes: &DestinationChanges,
    ) -> Result<Destination, DatabaseError> {
        let sql = format!(
            "UPDATE destinations SET \
               name = COALESCE($2, name), \
               description = COALESCE($3, description), \
               country_code = COALESCE($4, country_code), \
               kind = COALESCE($5, kind), \
               last_modif = now(), \
               updated_at = now() \
             WHERE id = $1 RETURNING {DESTINATION_COLUMNS}"
        );

        sqlx::query_as::<_, Destination>(&sql)
            .bind(id)
            .bind(changes.name.as_deref())
            .bind(changes.description.as_deref())
            .bind(changes.country_code.as_deref())
            .bind(changes.kind)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound("Destination not found".to_string()))
    }

    pub async fn delete(&self, id: i32) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM destinations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Destination not found".to_string()));
        }
        Ok(())
    }
}

fn apply_filters<'args>(builder: &mut QueryBuilder<'args, Postgres>, filter: &'args ListFilter) {
    let mut sep = " WHERE ";
    if let Some(kind) = filter.kind {
        builder.push(sep).push("kind = ").push_bind(kind);
        sep = " AND ";
    }
    if let Some(country) = &filter.country_code {
        builder.push(sep).push("country_code = ").push_bind(country.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let page = Page::new(None, None);
        assert_eq!(page, Page { page: 1, limit: 10 });
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn out_of_range_input_falls_back_to_defaults() {
        assert_eq!(Page::new(Some(0), Some(-5)), Page { page: 1, limit: 10 });
    }

    #[test]
    fn limit_is_capped() {
        assert_eq!(Page::new(Some(2), Some(500)).limit, Page::MAX_LIMIT);
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        assert_eq!(Page::new(Some(3), Some(10)).offset(), 20);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::new(Some(1), Some(10));
        assert_eq!(page.total_pages(25), 3);
        assert_eq!(page.total_pages(30), 3);
        assert_eq!(page.total_pages(31), 4);
        assert_eq!(page.total_pages(0), 0);
    }

    #[test]
    fn filters_compose_into_where_clause() {
        let filter = ListFilter {
            kind: Some(DestinationType::Beach),
            country_code: Some("MX".into()),
        };
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM destinations");
        apply_filters(&mut builder, &filter);
        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM destinations WHERE kind = $1 AND country_code = $2"
        );
    }

    #[test]
    fn empty_filter_adds_no_where_clause() {
        let filter = ListFilter::default();
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM destinations");
        apply_filters(&mut builder, &filter);
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM destinations");
    }
}
