use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use config::CorsConfig;
use services::CommandDispatcher;

use crate::middleware::correlation_id_middleware;

mod explain;
mod health;
mod refactor;

pub use explain::explain_code;
pub use health::ping;
pub use refactor::refactor_code;
pub use tests::generate_tests;

// Application state: the dispatcher is built once at startup and shared
// read-only across all requests.
pub type AppState = Arc<CommandDispatcher>;

/// Assemble the application router.
pub fn build_router(state: AppState, cors: &CorsConfig) -> Router {
    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors_layer = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/explain", post(explain_code))
        .route("/api/v1/refactor", post(refactor_code))
        .route("/api/v1/tests", post(generate_tests))
        .route("/api/ping", get(ping))
        .layer(from_fn(correlation_id_middleware))
        .layer(cors_layer)
        .with_state(state)
}
