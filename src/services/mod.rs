pub mod enrichment;
pub mod providers;
pub mod recommendations;
pub mod title_search;

pub use enrichment::{Enricher, Enrichment};
pub use providers::{MetadataProvider, TmdbProvider};
