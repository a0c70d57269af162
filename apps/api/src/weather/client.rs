/// Weather client: the single point of entry for OpenWeatherMap calls.
///
/// ARCHITECTURAL RULE: No other module may call the weather provider
/// directly. Both the create-diary path and the daily refresh go through
/// [`WeatherSource`].
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::weather::WeatherReport;

const PROVIDER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// The city the service records weather for.
/// This is intentionally hardcoded; the diary tracks a single location.
pub const CITY: &str = "seoul";

/// Body substituted for any transport-level failure. Callers never see a
/// transport error directly; parsing this sentinel fails instead, which is
/// how fetch failures surface downstream.
pub const FETCH_FAILED_SENTINEL: &str = "failed to get response";

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("provider payload is not valid JSON or has an unexpected shape: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("provider payload contains no weather conditions")]
    MissingCondition,
}

#[derive(Debug, Deserialize)]
struct ProviderPayload {
    main: ProviderMain,
    weather: Vec<ProviderCondition>,
}

#[derive(Debug, Deserialize)]
struct ProviderMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ProviderCondition {
    main: String,
    icon: String,
}

/// Parses a raw provider body into a report.
///
/// Only the first element of the `weather` array is consulted. Temperature
/// stays in the provider's native unit (Kelvin), unconverted.
pub fn parse_weather(raw: &str) -> Result<WeatherReport, WeatherError> {
    let payload: ProviderPayload = serde_json::from_str(raw)?;
    let condition = payload
        .weather
        .into_iter()
        .next()
        .ok_or(WeatherError::MissingCondition)?;

    Ok(WeatherReport {
        temperature: payload.main.temp,
        condition: condition.main,
        icon: condition.icon,
    })
}

/// The seam the diary service and the daily refresh depend on.
/// Production uses [`OpenWeatherClient`]; tests substitute their own.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetches and parses the current weather for the fixed city.
    async fn current(&self) -> Result<WeatherReport, WeatherError>;
}

/// HTTP client for the OpenWeatherMap current-weather endpoint.
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            // No timeout override; the client's default network timeouts apply.
            client: Client::new(),
            api_key,
        }
    }

    /// Issues a single GET to the provider and returns the raw body.
    ///
    /// No retry, no backoff. Transport failures are swallowed and replaced
    /// by [`FETCH_FAILED_SENTINEL`]. The body is read regardless of HTTP
    /// status, so non-200 error payloads flow to the parser unchanged.
    pub async fn fetch_raw(&self) -> String {
        let url = format!("{PROVIDER_URL}?q={CITY}&appid={}", self.api_key);

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("weather fetch failed: {e}");
                return FETCH_FAILED_SENTINEL.to_string();
            }
        };

        let status = response.status();
        match response.text().await {
            Ok(body) => {
                debug!("weather provider returned {status}");
                body
            }
            Err(e) => {
                warn!("weather response body could not be read: {e}");
                FETCH_FAILED_SENTINEL.to_string()
            }
        }
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn current(&self) -> Result<WeatherReport, WeatherError> {
        let raw = self.fetch_raw().await;
        parse_weather(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weather_full_payload() {
        let raw = r#"{"main":{"temp":280.5},"weather":[{"main":"Clouds","icon":"04d"}]}"#;
        let report = parse_weather(raw).unwrap();
        assert_eq!(report.temperature, 280.5);
        assert_eq!(report.condition, "Clouds");
        assert_eq!(report.icon, "04d");
    }

    #[test]
    fn test_parse_weather_ignores_trailing_conditions() {
        let raw = r#"{
            "main": {"temp": 293.1, "humidity": 40},
            "weather": [
                {"main": "Rain", "icon": "10d", "description": "light rain"},
                {"main": "Mist", "icon": "50d"}
            ]
        }"#;
        let report = parse_weather(raw).unwrap();
        assert_eq!(report.condition, "Rain");
        assert_eq!(report.icon, "10d");
    }

    #[test]
    fn test_parse_weather_rejects_malformed_body() {
        assert!(parse_weather("not json").is_err());
    }

    #[test]
    fn test_parse_weather_rejects_fetch_sentinel() {
        assert!(parse_weather(FETCH_FAILED_SENTINEL).is_err());
    }

    #[test]
    fn test_parse_weather_rejects_missing_main() {
        let raw = r#"{"weather":[{"main":"Clear","icon":"01d"}]}"#;
        assert!(parse_weather(raw).is_err());
    }

    #[test]
    fn test_parse_weather_rejects_empty_conditions() {
        let raw = r#"{"main":{"temp":280.5},"weather":[]}"#;
        assert!(matches!(
            parse_weather(raw),
            Err(WeatherError::MissingCondition)
        ));
    }
}
