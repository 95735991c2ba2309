use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

/// Largest accepted request body
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Creates the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index_page))
        .route("/health", get(handlers::health_check))
        .nest("/api", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

/// JSON routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/movies", get(handlers::list_movies))
        .route("/recommend", post(handlers::recommend))
}
