use std::cmp::Ordering;

use crate::{
    error::AppResult,
    index::{Catalog, SimilarityIndex, TitleQuery},
    models::{MovieRecord, Recommendation},
    services::enrichment::Enricher,
};

/// Ranks every row of `scores` by descending similarity
///
/// The sort is stable, so equal scores keep ascending row order. NaN scores
/// rank below every number.
pub fn rank_neighbors(scores: &[f32]) -> Vec<(usize, f32)> {
    let mut ranked: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| descending(a.1, b.1));
    ranked
}

fn descending(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Finds the movies most similar to the first title matching `query`
///
/// The top-ranked entry is dropped by position (it is normally the movie itself)
/// and the next `count` are returned in rank order. An unknown title yields an
/// empty list.
pub fn nearest_neighbors<'a>(
    index: &'a SimilarityIndex,
    query: &TitleQuery,
    count: usize,
) -> Vec<&'a MovieRecord> {
    let Some(selected) = index.resolve(query) else {
        return Vec::new();
    };
    let Some(scores) = index.similarity_row(selected.row) else {
        return Vec::new();
    };

    rank_neighbors(scores)
        .into_iter()
        .skip(1)
        .take(count)
        .filter_map(|(row, _)| index.movie(row))
        .collect()
}

/// Generates movie recommendations for `movie`
///
/// Fails only when the similarity index is unavailable. Poster and rating
/// lookups never fail the request; they degrade to placeholders per movie.
pub async fn recommend(
    catalog: &Catalog,
    enricher: &Enricher,
    movie: &str,
    count: usize,
) -> AppResult<Vec<Recommendation>> {
    let index = catalog.index()?;
    let query = TitleQuery::new(movie);

    let neighbors = nearest_neighbors(index, &query, count);
    if neighbors.is_empty() {
        tracing::info!(query = %movie, "No recommendations for movie");
        return Ok(Vec::new());
    }

    let enrichments = enricher.enrich_all(&neighbors).await;

    let recommendations: Vec<Recommendation> = neighbors
        .into_iter()
        .zip(enrichments)
        .map(|(movie, enrichment)| Recommendation {
            title: movie.title.clone(),
            poster: enrichment.poster_url,
            rating: enrichment.rating,
        })
        .collect();

    tracing::info!(
        query = %movie,
        results = recommendations.len(),
        "Recommendations generated"
    );

    Ok(recommendations)
}
