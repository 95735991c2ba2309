//! Loading of the offline artifact: the movie list and its similarity matrix.
//!
//! Both files are JSON. The movie list is an array of `{"movie_id", "title"}`
//! objects whose order defines the matrix rows; the matrix is an array of rows.

use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::SimilarityIndex;

/// Errors that can occur while loading the artifact
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Artifact shape mismatch: {0}")]
    Shape(String),
}

/// One entry of the movie list file. Extra columns (tags, overview...) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactMovie {
    pub movie_id: u64,
    pub title: String,
}

/// Loads both artifact files and builds the index
pub fn load(movies_path: &Path, similarity_path: &Path) -> Result<SimilarityIndex, LoadError> {
    let movies: Vec<ArtifactMovie> = read_json(movies_path)?;
    let similarity: Vec<Vec<f32>> = read_json(similarity_path)?;

    SimilarityIndex::from_parts(movies, similarity)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Checks that the matrix is square and has one row per movie
pub(super) fn validate_shape(movie_count: usize, similarity: &[Vec<f32>]) -> Result<(), LoadError> {
    if similarity.len() != movie_count {
        return Err(LoadError::Shape(format!(
            "{} movies but {} similarity rows",
            movie_count,
            similarity.len()
        )));
    }

    if let Some((row, scores)) = similarity
        .iter()
        .enumerate()
        .find(|(_, scores)| scores.len() != movie_count)
    {
        return Err(LoadError::Shape(format!(
            "similarity row {} has {} scores, expected {}",
            row,
            scores.len(),
            movie_count
        )));
    }

    Ok(())
}
