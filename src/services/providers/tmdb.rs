/// TMDB (The Movie Database) metadata provider
///
/// API Flow:
/// 1. Details: /3/movie/{movie_id} → poster_path + vote_average
///
/// Every call is bounded by the client timeout. No retries: callers fall back
/// to placeholder values instead.
use crate::{
    error::{AppError, AppResult},
    models::TmdbMovieDetails,
    services::providers::MetadataProvider,
};
use reqwest::Client as HttpClient;
use std::time::Duration;

const LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
}

impl TmdbProvider {
    /// Creates a new TMDB provider whose requests time out after `timeout`
    pub fn new(api_key: Option<String>, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        if api_key.is_none() {
            tracing::warn!("TMDB_API_KEY not set, posters and ratings will use placeholders");
        }

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn fetch_details(&self, movie_id: u64) -> AppResult<TmdbMovieDetails> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::ExternalApi("TMDB_API_KEY environment variable not set".to_string())
        })?;

        let url = format!("{}/3/movie/{}", self.api_url, movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", api_key), ("language", LANGUAGE)])
            .send()
            .await
            .map_err(|e| AppError::HttpClient(e.without_url()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| AppError::HttpClient(e.without_url()))?;
        let details: TmdbMovieDetails = serde_json::from_str(&response_text).map_err(|e| {
            tracing::debug!(
                error = %e,
                response = %response_text,
                "Failed to deserialize TMDB response"
            );
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })?;

        tracing::debug!(
            movie_id = movie_id,
            has_poster = details.poster_path.is_some(),
            has_rating = details.vote_average.is_some(),
            provider = "tmdb",
            "Movie details fetched"
        );

        Ok(details)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
