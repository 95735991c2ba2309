use std::sync::Arc;

use crate::config::Config;
use crate::index::Catalog;
use crate::services::{Enricher, MetadataProvider};

/// Result-size limits applied by the handlers
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub search: usize,
    pub listing: usize,
    pub recommendations: usize,
}

impl From<&Config> for Limits {
    fn from(config: &Config) -> Self {
        Self {
            search: config.search_limit,
            listing: config.listing_limit,
            recommendations: config.recommendation_count,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Shared application state
///
/// Everything in here is read-only after startup, so requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub enricher: Enricher,
    pub limits: Limits,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        provider: Arc<dyn MetadataProvider>,
        image_base_url: impl Into<String>,
        limits: Limits,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            enricher: Enricher::new(provider, image_base_url),
            limits,
        }
    }
}
