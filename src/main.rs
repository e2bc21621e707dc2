//! GitFinder OG Image Service
//!
//! Renders Open Graph preview cards for repositories with a headless browser and
//! serves the SPA shell with social meta tags injected for crawlers.

mod api;
mod assets;
mod config;
mod crawlers;
mod errors;
mod models;
mod render;
mod screenshot;
mod upstream;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use assets::Logo;
use config::Config;
use crawlers::CrawlerSignatures;
use screenshot::{ChromiumLauncher, ScreenshotEngine, Viewport};
use upstream::RepositoryApi;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub api: Arc<RepositoryApi>,
    pub screenshots: Arc<ScreenshotEngine>,
    pub crawlers: Arc<CrawlerSignatures>,
    pub logo: Arc<Logo>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting GitFinder OG Image Service");
    tracing::info!("Upstream API: {}", config.api_base_url);
    tracing::info!("Logo path: {:?}", config.logo_path);
    tracing::info!("SPA shell path: {:?}", config.index_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Fail fast on missing assets
    let logo = Logo::load(&config.logo_path)?;
    assets::verify_shell(&config.index_path)?;

    let crawlers = match &config.crawler_signatures {
        Some(custom) => CrawlerSignatures::new(custom),
        None => CrawlerSignatures::default(),
    };
    if crawlers.is_empty() {
        tracing::warn!("Crawler signature list is empty. Meta tags will never be injected!");
    }
    tracing::info!("Loaded {} crawler signatures", crawlers.len());

    let api = RepositoryApi::new(&config.api_base_url, config.upstream_timeout)?;

    let launcher = Arc::new(ChromiumLauncher::new(config.chrome_path.clone()));
    let screenshots = ScreenshotEngine::new(
        launcher,
        Viewport {
            width: render::CARD_WIDTH,
            height: render::CARD_HEIGHT,
        },
        config.render_timeout,
        config.max_concurrent_renders,
    );
    tracing::info!(
        "Browser limit: {} concurrent, render timeout {:?}",
        config.max_concurrent_renders,
        config.render_timeout
    );

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        api: Arc::new(api),
        screenshots: Arc::new(screenshots),
        crawlers: Arc::new(crawlers),
        logo: Arc::new(logo),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("OG Image service listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(api::og_image))
        .route("/repository/{id}", get(api::repository_page))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
