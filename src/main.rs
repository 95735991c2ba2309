use std::path::Path;
use std::sync::Arc;

use movie_recs_api::{
    api::{create_router, AppState, Limits},
    config::Config,
    index::Catalog,
    services::TmdbProvider,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_recs_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Load the similarity index once; a failure leaves the server up but degraded
    let catalog = Catalog::load(
        Path::new(&config.movies_path),
        Path::new(&config.similarity_path),
    );

    let provider = TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.tmdb_timeout(),
    )?;

    let state = AppState::new(
        catalog,
        Arc::new(provider),
        config.tmdb_image_base_url.clone(),
        Limits::from(&config),
    );

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
