use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use cantina::config::AppConfig;
use cantina::handlers;
use cantina::models::MenuCatalog;
use cantina::services::backend::http::HttpReservationBackend;
use cantina::services::sessions::SessionStore;
use cantina::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    anyhow::ensure!(
        config.request_timeout_secs > 0,
        "REQUEST_TIMEOUT_SECS must be greater than zero"
    );

    let menu = MenuCatalog::bundled()?;
    tracing::info!(sections = menu.sections.len(), "menu loaded");

    let backend = HttpReservationBackend::new(
        config.blocked_dates_url.clone(),
        config.reservation_url.clone(),
        config.request_timeout(),
    )?;
    tracing::info!(
        blocked_dates = %config.blocked_dates_url,
        reservations = %config.reservation_url,
        "using remote reservation service"
    );

    let state = Arc::new(AppState {
        sessions: SessionStore::new(config.session_ttl(), config.restaurant_phone.clone()),
        backend: Box::new(backend),
        menu,
        config: config.clone(),
    });

    let mut app = handlers::router(state).layer(TraceLayer::new_for_http());
    if let Some(origin) = &config.cors_origin {
        let origin: HeaderValue = origin.parse()?;
        app = app.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE]),
        );
    }

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
