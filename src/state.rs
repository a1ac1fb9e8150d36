use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::validation::RequestValidator;

/// Shared application state, constructed once in `main` and cloned into
/// every handler. Explicit dependency injection: nothing here is a
/// process-global.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
    pub validator: Arc<RequestValidator>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            validator: Arc::new(RequestValidator::new()),
        }
    }
}
