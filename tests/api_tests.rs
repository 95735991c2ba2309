use std::path::Path;
use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use movie_recs_api::{
    api::{create_router, AppState, Limits},
    error::{AppError, AppResult},
    index::{ArtifactMovie, Catalog, SimilarityIndex},
    models::TmdbMovieDetails,
    services::MetadataProvider,
};

const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

/// Metadata provider that knows every movie except `unknown_id`
struct StubProvider {
    unknown_id: Option<u64>,
}

#[async_trait::async_trait]
impl MetadataProvider for StubProvider {
    async fn fetch_details(&self, movie_id: u64) -> AppResult<TmdbMovieDetails> {
        if Some(movie_id) == self.unknown_id {
            return Err(AppError::ExternalApi("TMDB API returned status 404".to_string()));
        }
        Ok(TmdbMovieDetails {
            poster_path: Some(format!("/poster{}.jpg", movie_id)),
            vote_average: Some(6.5),
        })
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Seven movies; similarity decays with distance between rows
fn test_index() -> SimilarityIndex {
    let titles = [
        "Avatar",
        "Aliens",
        "Alien",
        "Titanic",
        "The Terminator",
        "Terminator 2: Judgment Day",
        "The Abyss",
    ];
    let movies: Vec<ArtifactMovie> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| ArtifactMovie {
            movie_id: 1000 + i as u64,
            title: title.to_string(),
        })
        .collect();
    let n = titles.len();
    let similarity: Vec<Vec<f32>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| 1.0 - 0.1 * (i as f32 - j as f32).abs())
                .collect()
        })
        .collect();
    SimilarityIndex::from_parts(movies, similarity).unwrap()
}

fn server_with(catalog: Catalog, unknown_id: Option<u64>) -> TestServer {
    let state = AppState::new(
        catalog,
        Arc::new(StubProvider { unknown_id }),
        IMAGE_BASE,
        Limits::default(),
    );
    TestServer::new(create_router(state)).unwrap()
}

fn create_test_server() -> TestServer {
    server_with(Catalog::available(test_index()), None)
}

fn unavailable_server() -> TestServer {
    let catalog = Catalog::load(
        Path::new("/nonexistent/movie_list.json"),
        Path::new("/nonexistent/similarity.json"),
    );
    server_with(catalog, None)
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["movies"], 7);
    assert!(body["loaded_at"].is_string());
}

#[tokio::test]
async fn test_health_check_degraded() {
    let server = unavailable_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "degraded");
    assert!(body["loaded_at"].is_null());
}

#[tokio::test]
async fn test_index_page() {
    let server = create_test_server();
    let response = server.get("/").await;
    response.assert_status_ok();
    assert!(response.text().contains("/api/recommend"));
}

#[tokio::test]
async fn test_index_page_without_data() {
    let server = unavailable_server();
    let response = server.get("/").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.text().contains("Movie data not loaded"));
}

#[tokio::test]
async fn test_list_movies_without_query() {
    let server = create_test_server();
    let response = server.get("/api/movies").await;
    response.assert_status_ok();
    let titles: Vec<String> = response.json();
    assert_eq!(titles.len(), 7);
    assert_eq!(titles[0], "Avatar");
    assert_eq!(titles[6], "The Abyss");
}

#[tokio::test]
async fn test_list_movies_with_limit() {
    let server = create_test_server();
    let response = server.get("/api/movies").add_query_param("limit", 2).await;
    let titles: Vec<String> = response.json();
    assert_eq!(titles, vec!["Avatar", "Aliens"]);
}

#[tokio::test]
async fn test_search_movies_case_insensitive() {
    let server = create_test_server();
    let response = server.get("/api/movies").add_query_param("q", "TERMINATOR").await;
    response.assert_status_ok();
    let titles: Vec<String> = response.json();
    assert_eq!(titles, vec!["The Terminator", "Terminator 2: Judgment Day"]);
}

#[tokio::test]
async fn test_search_movies_without_data() {
    let server = unavailable_server();
    let response = server.get("/api/movies").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["error"], "Movie data not loaded");
}

#[tokio::test]
async fn test_recommend() {
    let server = create_test_server();
    let response = server
        .post("/api/recommend")
        .json(&json!({ "movie": "avatar" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["selected_movie"], "avatar");

    let recommendations = body["recommendations"].as_array().unwrap();
    let titles: Vec<&str> = recommendations
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Aliens",
            "Alien",
            "Titanic",
            "The Terminator",
            "Terminator 2: Judgment Day"
        ]
    );
    assert_eq!(
        recommendations[0]["poster"],
        format!("{}/poster1001.jpg", IMAGE_BASE)
    );
    assert_eq!(recommendations[0]["rating"], 6.5);
}

#[tokio::test]
async fn test_recommend_degrades_single_enrichment_failure() {
    // "Titanic" has movie id 1003
    let server = server_with(Catalog::available(test_index()), Some(1003));
    let response = server
        .post("/api/recommend")
        .json(&json!({ "movie": "Avatar" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 5);

    for recommendation in recommendations {
        if recommendation["title"] == "Titanic" {
            assert_eq!(
                recommendation["poster"],
                "https://via.placeholder.com/500x750?text=Error+Loading"
            );
            assert_eq!(recommendation["rating"], "N/A");
        } else {
            assert_eq!(recommendation["rating"], 6.5);
        }
    }
}

#[tokio::test]
async fn test_recommend_no_match() {
    let server = create_test_server();
    let response = server
        .post("/api/recommend")
        .json(&json!({ "movie": "zzzznotamovie" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["selected_movie"], "zzzznotamovie");
    assert_eq!(body["recommendations"], json!([]));
}

#[tokio::test]
async fn test_recommend_requires_movie() {
    let server = create_test_server();

    let response = server.post("/api/recommend").json(&json!({})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Movie name is required");

    let response = server
        .post("/api/recommend")
        .json(&json!({ "movie": "" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommend_whitespace_matches_first_title_with_space() {
    // " " first matches "The Terminator" (row 4)
    let server = create_test_server();
    let response = server
        .post("/api/recommend")
        .json(&json!({ "movie": " " }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["selected_movie"], " ");
    let titles: Vec<&str> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Titanic",
            "Terminator 2: Judgment Day",
            "Alien",
            "The Abyss",
            "Aliens"
        ]
    );
}

#[tokio::test]
async fn test_recommend_without_data() {
    let server = unavailable_server();
    let response = server
        .post("/api/recommend")
        .json(&json!({ "movie": "Avatar" }))
        .await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_request_id_header_is_returned() {
    let server = create_test_server();
    let response = server.get("/health").await;
    let request_id = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(request_id.to_str().unwrap()).is_ok());
}
