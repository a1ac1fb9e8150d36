use sqlx::PgPool;

use super::models::User;
use super::DatabaseError;

const USER_COLUMNS: &str = "id, email, password, name, created_at, updated_at";

/// Persistence for user records. Callers hand in an already-hashed
/// password; this layer never sees plaintext.
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user. A concurrent duplicate registration loses the
    /// race on the unique email index and surfaces as Conflict.
    pub async fn insert(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
    ) -> Result<User, DatabaseError> {
        let sql = format!(
            "INSERT INTO users (email, password, name) VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .bind(password_hash)
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::on_unique_violation(e, "Email is already registered"))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }
}
