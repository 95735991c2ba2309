use crate::{
    error::AppResult,
    index::{Catalog, TitleQuery},
};

/// Service function for title search and listing
///
/// With a non-empty query, returns titles containing it (case-insensitive) up to
/// `search_limit`. Without one, returns the first `listing_limit` titles. Both keep
/// artifact order.
pub fn search_titles(
    catalog: &Catalog,
    query: Option<&str>,
    search_limit: usize,
    listing_limit: usize,
) -> AppResult<Vec<String>> {
    let index = catalog.index()?;
    let query = TitleQuery::new(query.unwrap_or_default());
    let limit = if query.is_empty() {
        listing_limit
    } else {
        search_limit
    };

    let titles: Vec<String> = index
        .search(&query, limit)
        .into_iter()
        .map(|movie| movie.title.clone())
        .collect();

    tracing::debug!(results = titles.len(), limit = limit, "Title search completed");

    Ok(titles)
}
