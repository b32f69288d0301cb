use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use drama_recommender::{
    api::{create_router, AppState},
    catalog::Catalog,
    config::Config,
    services::{providers::HttpBackend, EngineSettings, RecommendationEngine},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("drama_recommender=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::sample()?,
    };

    let backend = HttpBackend::new(config.backend_url.clone(), config.request_timeout())?;
    let engine = RecommendationEngine::new(
        Arc::new(backend),
        catalog,
        EngineSettings::from(&config),
    );

    // Decided once; only an explicit re-probe changes it afterwards
    let snapshot = engine.probe().await;
    tracing::info!(
        state = %snapshot.state,
        backend_url = %config.backend_url,
        catalog_entries = engine.catalog().len(),
        "Recommendation engine ready"
    );

    let app = create_router(AppState::new(engine));

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Server running on http://{}", config.bind_address());
    axum::serve(listener, app).await?;

    Ok(())
}
