/// Movie metadata provider abstraction
///
/// Poster and rating lookups go through this trait so the HTTP-backed TMDB client
/// can be replaced in tests or by another metadata source.
use crate::{error::AppResult, models::TmdbMovieDetails};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
///
/// Implementations return the raw details or an error. Deciding what to show when
/// a lookup fails is left to `services::enrichment`.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch poster path and audience rating for a TMDB movie id
    async fn fetch_details(&self, movie_id: u64) -> AppResult<TmdbMovieDetails>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
