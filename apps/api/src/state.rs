use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::weather::client::WeatherSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Live weather source, consulted on cache misses and by the daily refresh.
    pub weather: Arc<dyn WeatherSource>,
    #[allow(dead_code)]
    pub config: Config,
}
