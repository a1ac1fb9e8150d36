use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::database;
use crate::handlers::{auth, destinations};
use crate::middleware::require_auth;
use crate::state::AppState;

/// Build the application router. Listing and single-destination reads are
/// public; mutations and the profile endpoint sit behind the bearer-token
/// middleware.
pub fn app(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/destinations", get(destinations::list))
        .route("/api/destinations/:id", get(destinations::show));

    let protected = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/destinations", post(destinations::create))
        .route(
            "/api/destinations/:id",
            put(destinations::update).delete(destinations::delete),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Destinations API",
        "version": version,
        "endpoints": {
            "health": "/health (public)",
            "auth": "/api/auth/register, /api/auth/login (public), /api/auth/me (bearer)",
            "destinations": "/api/destinations[/:id] (GET public; POST/PUT/DELETE bearer)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match database::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database": e.to_string()
            })),
        ),
    }
}
