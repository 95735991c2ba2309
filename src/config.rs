use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path to the movie list artifact (row order of the similarity matrix)
    #[serde(default = "default_movies_path")]
    pub movies_path: String,

    /// Path to the precomputed similarity matrix artifact
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// TMDB API key. Without it every poster/rating lookup degrades to placeholders.
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base path that relative poster paths are appended to
    #[serde(default = "default_tmdb_image_base_url")]
    pub tmdb_image_base_url: String,

    /// Per-call timeout for metadata lookups
    #[serde(default = "default_tmdb_timeout_secs")]
    pub tmdb_timeout_secs: u64,

    /// Maximum number of titles returned by a filtered search
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    /// Maximum number of titles returned when listing without a query
    #[serde(default = "default_listing_limit")]
    pub listing_limit: usize,

    /// Number of neighbours returned per recommendation
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_movies_path() -> String {
    "data/movie_list.json".to_string()
}

fn default_similarity_path() -> String {
    "data/similarity.json".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_tmdb_timeout_secs() -> u64 {
    5
}

fn default_search_limit() -> usize {
    20
}

fn default_listing_limit() -> usize {
    50
}

fn default_recommendation_count() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            movies_path: default_movies_path(),
            similarity_path: default_similarity_path(),
            tmdb_api_key: None,
            tmdb_api_url: default_tmdb_api_url(),
            tmdb_image_base_url: default_tmdb_image_base_url(),
            tmdb_timeout_secs: default_tmdb_timeout_secs(),
            search_limit: default_search_limit(),
            listing_limit: default_listing_limit(),
            recommendation_count: default_recommendation_count(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn tmdb_timeout(&self) -> Duration {
        Duration::from_secs(self.tmdb_timeout_secs)
    }
}
