//! API Routes
//!
//! Configures the Axum router with all cache endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_handler, delete_handler, delete_multi_handler, get_handler, get_multi_handler,
    has_handler, health_handler, set_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /set` - Store a value (`auto_insert: false` only updates)
/// - `POST /add` - Store a value (`overwrite: false` keeps an existing one)
/// - `GET /get/:key` - Retrieve a value by key
/// - `POST /get-multi` - Retrieve several keys, in request order
/// - `GET /has/:key` - Check whether a key is stored
/// - `DELETE /del/:key` - Delete a key
/// - `POST /del-multi` - Delete several keys
/// - `GET /stats` - Store statistics
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", put(set_handler))
        .route("/add", post(add_handler))
        .route("/get/:key", get(get_handler))
        .route("/get-multi", post(get_multi_handler))
        .route("/has/:key", get(has_handler))
        .route("/del/:key", delete(delete_handler))
        .route("/del-multi", post(delete_multi_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
