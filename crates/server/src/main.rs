use axum::{Router, routing::get};
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitae_model::{ContentRepository, InMemoryRepository};
use vitae_pipeline::{CertificateFetcher, CvAssembler};
use vitae_resource::ResourceLocator;
use vitae_server::{api, config::Config, pages::PageRenderer, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting portfolio service...");

    let config = Config::load()?;
    tracing::info!("Configuration loaded");

    let repository = InMemoryRepository::from_json_file(&config.content.data_file)
        .map_err(|e| anyhow::anyhow!("failed to load {:?}: {}", config.content.data_file, e))?;
    let repository: Arc<dyn ContentRepository> = Arc::new(repository);
    tracing::info!("Content loaded from {}", config.content.data_file.display());

    let resolver = ResourceLocator::new(
        config.media.url.clone(),
        config.media.root.clone(),
        config.media.static_url.clone(),
        config.media.static_root.clone(),
    )
    .with_static_search_paths(config.media.static_search_paths.clone());
    let fetcher = CertificateFetcher::new(
        config.media.root.clone(),
        Duration::from_secs(config.fetch.timeout_secs),
    )
    .map_err(|e| anyhow::anyhow!("failed to build certificate fetcher: {}", e))?;
    let assembler = CvAssembler::new(repository.clone(), fetcher, Box::new(resolver))
        .map_err(|e| anyhow::anyhow!("failed to build assembler: {}", e))?;
    tracing::info!("CV assembler initialized");

    let page_renderer = PageRenderer::new()?;
    let app_state = AppState::new(assembler, repository, page_renderer, config.clone());

    let app = build_router(app_state, &config);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Portfolio service listening on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - GET /              (home)");
    tracing::info!("  - GET /experiencia");
    tracing::info!("  - GET /educacion");
    tracing::info!("  - GET /reconocimientos");
    tracing::info!("  - GET /proyectos");
    tracing::info!("  - GET /venta");
    tracing::info!("  - GET /cv/pdf        (CV download)");
    tracing::info!("  - GET /health");

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/", get(api::home_page))
        .route("/experiencia", get(api::experience_page))
        .route("/educacion", get(api::education_page))
        .route("/reconocimientos", get(api::recognitions_page))
        .route("/proyectos", get(api::projects_page))
        .route("/venta", get(api::sale_page))
        .route("/cv/pdf", get(api::download_cv))
        .route("/health", get(api::health_check))
        .nest_service(
            config.media.url.trim_end_matches('/'),
            ServeDir::new(&config.media.root),
        )
        .nest_service(
            config.media.static_url.trim_end_matches('/'),
            ServeDir::new(&config.media.static_root),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,vitae_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
