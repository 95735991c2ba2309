use serde::{Deserialize, Serialize, Serializer};

pub mod tmdb;

pub use tmdb::TmdbMovieDetails;

/// One row of the precomputed artifact
///
/// `row` is the position in the movie list and the row of the similarity matrix
/// that belongs to this movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRecord {
    pub row: usize,
    pub title: String,
    /// TMDB movie id, used for poster and rating lookups
    pub movie_id: u64,
}

/// Audience rating of a recommended movie
///
/// Serializes as a plain number, or as the string `"N/A"` when unknown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rating {
    Score(f64),
    Unavailable,
}

impl From<Option<f64>> for Rating {
    fn from(score: Option<f64>) -> Self {
        score.map(Rating::Score).unwrap_or(Rating::Unavailable)
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rating::Score(score) => serializer.serialize_f64(*score),
            Rating::Unavailable => serializer.serialize_str("N/A"),
        }
    }
}

/// A single recommended movie returned to the client
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub poster: String,
    pub rating: Rating,
}

/// Request body of `POST /api/recommend`
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub movie: Option<String>,
}

/// Response body of `POST /api/recommend`
#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub selected_movie: String,
    pub recommendations: Vec<Recommendation>,
}
