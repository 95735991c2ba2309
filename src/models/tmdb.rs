use serde::Deserialize;

// ============================================================================
// TMDB API Types
// ============================================================================

/// Subset of the TMDB `GET /3/movie/{id}` response we care about
///
/// Both fields may be missing or `null` for obscure titles.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}
