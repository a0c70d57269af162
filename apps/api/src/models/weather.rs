use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Parsed provider payload: the three fields the diary records.
/// Temperature is kept in the provider's native Kelvin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub temperature: f64,
    pub condition: String,
    pub icon: String,
}

/// One cached weather row per calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DateWeatherRow {
    pub date: NaiveDate,
    pub temperature: f64,
    pub condition: String,
    pub icon: String,
}

impl DateWeatherRow {
    pub fn from_report(date: NaiveDate, report: WeatherReport) -> Self {
        DateWeatherRow {
            date,
            temperature: report.temperature,
            condition: report.condition,
            icon: report.icon,
        }
    }

    pub fn into_report(self) -> WeatherReport {
        WeatherReport {
            temperature: self.temperature,
            condition: self.condition,
            icon: self.icon,
        }
    }
}
