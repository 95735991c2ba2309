use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::MovieRecord,
};

pub mod artifact;
pub mod matching;

pub use artifact::{ArtifactMovie, LoadError};
pub use matching::TitleQuery;

/// Immutable, precomputed item-to-item similarity index
///
/// Row `i` of the matrix holds the similarity of movie `i` to every movie,
/// including itself. Built once at startup and never mutated afterwards.
#[derive(Debug)]
pub struct SimilarityIndex {
    movies: Vec<MovieRecord>,
    similarity: Vec<Vec<f32>>,
    /// Lowercased titles, parallel to `movies`
    search_keys: Vec<String>,
    loaded_at: DateTime<Utc>,
}

impl SimilarityIndex {
    /// Builds an index from the artifact's movie list and matrix
    pub fn from_parts(
        movies: Vec<ArtifactMovie>,
        similarity: Vec<Vec<f32>>,
    ) -> Result<Self, LoadError> {
        artifact::validate_shape(movies.len(), &similarity)?;

        let movies: Vec<MovieRecord> = movies
            .into_iter()
            .enumerate()
            .map(|(row, movie)| MovieRecord {
                row,
                title: movie.title,
                movie_id: movie.movie_id,
            })
            .collect();
        let search_keys = movies
            .iter()
            .map(|movie| matching::normalize(&movie.title))
            .collect();

        Ok(Self {
            movies,
            similarity,
            search_keys,
            loaded_at: Utc::now(),
        })
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn movie(&self, row: usize) -> Option<&MovieRecord> {
        self.movies.get(row)
    }

    /// Similarity of `row` to every movie, indexed by row
    pub fn similarity_row(&self, row: usize) -> Option<&[f32]> {
        self.similarity.get(row).map(Vec::as_slice)
    }

    /// Movies whose title contains `query`, case-insensitively, in artifact order
    ///
    /// An empty query lists the first `limit` movies.
    pub fn search(&self, query: &TitleQuery, limit: usize) -> Vec<&MovieRecord> {
        query
            .filter(&self.search_keys, limit)
            .map(|row| &self.movies[row])
            .collect()
    }

    /// First movie, in artifact order, whose title contains `query`
    pub fn resolve(&self, query: &TitleQuery) -> Option<&MovieRecord> {
        query
            .first_match(&self.search_keys)
            .map(|row| &self.movies[row])
    }
}

/// Read-only handle to the similarity index, shared by all requests
///
/// Holds either the loaded index or the reason it could not be loaded, so the
/// server can still start and answer every lookup with `DataUnavailable`.
#[derive(Debug, Clone)]
pub struct Catalog {
    state: Result<Arc<SimilarityIndex>, String>,
}

impl Catalog {
    /// Loads the artifact once. Failures are logged and kept as the unavailable reason.
    pub fn load(movies_path: &Path, similarity_path: &Path) -> Self {
        match artifact::load(movies_path, similarity_path) {
            Ok(index) => {
                tracing::info!(
                    movies = index.len(),
                    movies_path = %movies_path.display(),
                    similarity_path = %similarity_path.display(),
                    "Loaded similarity index"
                );
                Self::available(index)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "Failed to load similarity index, serving without movie data"
                );
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn available(index: SimilarityIndex) -> Self {
        Self {
            state: Ok(Arc::new(index)),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: Err(reason.into()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.state.is_ok()
    }

    /// The loaded index, or `DataUnavailable` if loading failed
    pub fn index(&self) -> AppResult<&SimilarityIndex> {
        self.state
            .as_deref()
            .map_err(|reason| AppError::DataUnavailable(reason.clone()))
    }
}
