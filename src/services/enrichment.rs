use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{MovieRecord, Rating, TmdbMovieDetails},
    services::providers::MetadataProvider,
};

/// Poster shown when TMDB knows the movie but has no poster for it
pub const NO_POSTER_URL: &str = "https://via.placeholder.com/500x750?text=No+Poster";

/// Poster shown when the metadata lookup failed
pub const ERROR_POSTER_URL: &str = "https://via.placeholder.com/500x750?text=Error+Loading";

/// Poster URL and rating of one movie
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    pub poster_url: String,
    pub rating: Rating,
}

impl Enrichment {
    /// Placeholder values used when the lookup failed
    pub fn fallback() -> Self {
        Self {
            poster_url: ERROR_POSTER_URL.to_string(),
            rating: Rating::Unavailable,
        }
    }

    /// Builds display values from a successful lookup
    pub fn from_details(details: TmdbMovieDetails, image_base_url: &str) -> Self {
        let poster_url = match details.poster_path.as_deref() {
            Some(path) if !path.trim().is_empty() => poster_url(image_base_url, path),
            _ => NO_POSTER_URL.to_string(),
        };

        Self {
            poster_url,
            rating: Rating::from(details.vote_average),
        }
    }
}

/// Joins the image base and a relative poster path with exactly one slash
fn poster_url(image_base_url: &str, poster_path: &str) -> String {
    format!(
        "{}/{}",
        image_base_url.trim_end_matches('/'),
        poster_path.trim_start_matches('/')
    )
}

/// Looks up posters and ratings, degrading to placeholders on any failure
#[derive(Clone)]
pub struct Enricher {
    provider: Arc<dyn MetadataProvider>,
    image_base_url: String,
}

impl Enricher {
    pub fn new(provider: Arc<dyn MetadataProvider>, image_base_url: impl Into<String>) -> Self {
        Self {
            provider,
            image_base_url: image_base_url.into(),
        }
    }

    /// Enriches a single movie. Never fails: errors are logged and replaced by
    /// `Enrichment::fallback()`.
    pub async fn enrich(&self, movie_id: u64) -> Enrichment {
        let details: AppResult<TmdbMovieDetails> = self.provider.fetch_details(movie_id).await;

        match details {
            Ok(details) => Enrichment::from_details(details, &self.image_base_url),
            Err(e) => {
                tracing::warn!(
                    movie_id = movie_id,
                    provider = self.provider.name(),
                    error = %e,
                    "Metadata lookup failed, using placeholder poster and rating"
                );
                Enrichment::fallback()
            }
        }
    }

    /// Enriches movies concurrently, returning results in the order given
    ///
    /// Each lookup runs in its own task; a task that fails to complete only
    /// degrades its own entry.
    pub async fn enrich_all(&self, movies: &[&MovieRecord]) -> Vec<Enrichment> {
        let mut tasks = Vec::with_capacity(movies.len());

        for movie in movies {
            let enricher = self.clone();
            let movie_id = movie.movie_id;
            let task = tokio::spawn(async move { enricher.enrich(movie_id).await });
            tasks.push((movie_id, task));
        }

        let mut results = Vec::with_capacity(tasks.len());

        for (movie_id, task) in tasks {
            match task.await {
                Ok(enrichment) => results.push(enrichment),
                Err(e) => {
                    tracing::error!(movie_id = movie_id, error = %e, "Enrichment task join error");
                    results.push(Enrichment::fallback());
                }
            }
        }

        results
    }
}
