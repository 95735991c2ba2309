use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{RecommendRequest, RecommendResponse},
    services::{recommendations, title_search},
};

use super::AppState;

const INDEX_PAGE: &str = include_str!("../../static/index.html");
const ERROR_PAGE: &str = include_str!("../../static/error.html");

// Request types

#[derive(Debug, Deserialize)]
pub struct MoviesQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

// Handlers

/// Health check endpoint
///
/// Always 200 so the process stays up; reports "degraded" while movie data is missing.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let body = match state.catalog.index() {
        Ok(index) => json!({
            "status": "healthy",
            "movies": index.len(),
            "loaded_at": index.loaded_at(),
        }),
        Err(_) => json!({
            "status": "degraded",
            "movies": 0,
            "loaded_at": null,
        }),
    };

    (StatusCode::OK, Json(body))
}

/// Browser UI
pub async fn index_page(State(state): State<AppState>) -> Response {
    if state.catalog.is_available() {
        Html(INDEX_PAGE).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Html(ERROR_PAGE)).into_response()
    }
}

/// Title listing and autocomplete
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<MoviesQuery>,
) -> AppResult<Json<Vec<String>>> {
    let (search_limit, listing_limit) = match params.limit {
        Some(limit) => (limit, limit),
        None => (state.limits.search, state.limits.listing),
    };

    let titles = title_search::search_titles(
        &state.catalog,
        params.q.as_deref(),
        search_limit,
        listing_limit,
    )?;

    Ok(Json(titles))
}

/// Recommend movies similar to the one in the request body
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Json<RecommendResponse>> {
    state.catalog.index()?;

    let movie = request
        .movie
        .filter(|movie| !movie.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Movie name is required".to_string()))?;

    tracing::info!(
        request_id = %request_id,
        movie = %movie,
        "Processing recommendation request"
    );

    let recommendations = recommendations::recommend(
        &state.catalog,
        &state.enricher,
        &movie,
        state.limits.recommendations,
    )
    .await?;

    tracing::info!(
        request_id = %request_id,
        results = recommendations.len(),
        "Recommendation request completed"
    );

    Ok(Json(RecommendResponse {
        selected_movie: movie,
        recommendations,
    }))
}
