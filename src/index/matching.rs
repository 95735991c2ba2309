//! Case-insensitive substring matching of titles
//!
//! Titles are normalized once when the index is built, queries once per request.
//! An empty query matches every title.

/// Normalized form of a title used for comparisons
pub fn normalize(title: &str) -> String {
    title.to_lowercase()
}

/// A normalized search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleQuery {
    needle: String,
}

impl TitleQuery {
    pub fn new(query: &str) -> Self {
        Self {
            needle: normalize(query),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Whether an already-normalized title contains this query
    pub fn matches(&self, normalized_title: &str) -> bool {
        normalized_title.contains(&self.needle)
    }

    /// Positions of all matching titles, in their original order, up to `limit`
    pub fn filter<'a, I>(&'a self, normalized_titles: I, limit: usize) -> impl Iterator<Item = usize> + 'a
    where
        I: IntoIterator<Item = &'a String>,
        I::IntoIter: 'a,
    {
        normalized_titles
            .into_iter()
            .enumerate()
            .filter(move |(_, title)| self.matches(title))
            .map(|(position, _)| position)
            .take(limit)
    }

    /// Position of the first matching title. Earlier titles win ties.
    pub fn first_match<'a, I>(&self, normalized_titles: I) -> Option<usize>
    where
        I: IntoIterator<Item = &'a String>,
    {
        normalized_titles
            .into_iter()
            .position(|title| self.matches(title))
    }
}
