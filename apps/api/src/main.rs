mod config;
mod db;
mod diary;
mod errors;
mod models;
mod routes;
mod state;
mod weather;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;
use crate::weather::client::{OpenWeatherClient, WeatherSource, CITY};
use crate::weather::refresh::spawn_daily_refresh;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Weather Diary v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize weather client
    let weather: Arc<dyn WeatherSource> =
        Arc::new(OpenWeatherClient::new(config.openweathermap_api_key.clone()));
    info!("Weather client initialized (city: {CITY})");

    // Daily cache refresh runs for the life of the process
    spawn_daily_refresh(db.clone(), Arc::clone(&weather));
    info!("Daily weather refresh scheduled");

    // Build app state
    let state = AppState {
        db,
        weather,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
