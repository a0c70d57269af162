use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{Local, NaiveDateTime, NaiveTime};
use sqlx::PgPool;
use tracing::{error, info};

use crate::models::weather::DateWeatherRow;
use crate::weather::client::WeatherSource;
use crate::weather::store;

/// Local wall-clock time at which the daily cache refresh fires.
const REFRESH_HOUR: u32 = 1;

/// Starts the daily weather refresh loop.
///
/// Runs for the life of the process with no persisted checkpoint; after a
/// restart the loop simply waits for the next scheduled tick. A failed
/// refresh is logged and the loop keeps going.
pub fn spawn_daily_refresh(
    pool: PgPool,
    weather: Arc<dyn WeatherSource>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let wait = duration_until_next_run(Local::now().naive_local());
            tokio::time::sleep(wait).await;

            if let Err(e) = refresh_once(&pool, weather.as_ref()).await {
                error!("daily weather refresh failed: {e:#}");
            }
        }
    })
}

/// Fetches live weather and appends a snapshot row stamped with today's
/// date. No same-day dedup check: a second run within one day adds a second
/// row, and readers take the first match.
pub async fn refresh_once(pool: &PgPool, weather: &dyn WeatherSource) -> Result<()> {
    let report = weather.current().await?;
    let row = DateWeatherRow::from_report(Local::now().date_naive(), report);

    store::save(pool, &row).await?;
    info!("recorded weather snapshot for {}", row.date);
    Ok(())
}

/// Time remaining until the next refresh tick, in local wall-clock terms.
fn duration_until_next_run(now: NaiveDateTime) -> Duration {
    let run_time = NaiveTime::from_hms_opt(REFRESH_HOUR, 0, 0).expect("valid wall-clock time");

    let mut next = now.date().and_time(run_time);
    if next <= now {
        next += chrono::Duration::days(1);
    }

    (next - now).to_std().unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_next_run_later_same_day() {
        let wait = duration_until_next_run(at(0, 30, 0));
        assert_eq!(wait, Duration::from_secs(30 * 60));
    }

    #[test]
    fn test_next_run_rolls_over_at_exact_tick() {
        let wait = duration_until_next_run(at(1, 0, 0));
        assert_eq!(wait, Duration::from_secs(24 * 60 * 60));
    }

    #[test]
    fn test_next_run_after_tick_waits_until_tomorrow() {
        let wait = duration_until_next_run(at(13, 0, 0));
        assert_eq!(wait, Duration::from_secs(12 * 60 * 60));
    }
}
