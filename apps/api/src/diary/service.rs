use chrono::{Datelike, NaiveDate};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, info};

use crate::diary::store;
use crate::errors::AppError;
use crate::models::diary::DiaryRow;
use crate::models::weather::WeatherReport;
use crate::weather::client::WeatherSource;
use crate::weather::store as weather_store;

/// Read dates beyond 3050-01-01 are rejected as obviously-wrong input.
fn exceeds_future_bound(date: NaiveDate) -> bool {
    const MAX_YEAR: i32 = 3050;
    date.year() > MAX_YEAR || (date.year() == MAX_YEAR && date.ordinal() > 1)
}

/// Creates a diary entry for `date`, stamping it with that day's weather.
///
/// Runs under serializable isolation so two concurrent creates for an
/// uncached date cannot interleave the cache lookup and the insert. Note
/// that duplicate snapshot rows under truly concurrent misses are still
/// possible at the cache-store level; both entries end up with complete
/// weather fields either way.
pub async fn create_diary(
    pool: &PgPool,
    weather: &dyn WeatherSource,
    date: NaiveDate,
    text: &str,
) -> Result<DiaryRow, AppError> {
    info!("creating diary entry for {date}");

    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
        .execute(&mut *tx)
        .await?;

    let report = date_weather(&mut tx, weather, date).await?;
    let entry = store::insert(&mut *tx, date, text, &report).await?;
    tx.commit().await?;

    debug!("created diary entry {} for {date}", entry.id);
    Ok(entry)
}

/// Resolves weather for `date`: the first cached snapshot if one exists,
/// else a live fetch. The live result is not written back to the cache on
/// this path; only the daily refresh populates it.
async fn date_weather(
    tx: &mut Transaction<'_, Postgres>,
    weather: &dyn WeatherSource,
    date: NaiveDate,
) -> Result<WeatherReport, AppError> {
    let cached = weather_store::find_by_date(&mut **tx, date).await?;

    match cached.into_iter().next() {
        Some(row) => Ok(row.into_report()),
        None => {
            debug!("no cached weather for {date}, fetching live");
            Ok(weather.current().await?)
        }
    }
}

/// All entries for `date`, oldest first. Possibly empty.
pub async fn read_diary(pool: &PgPool, date: NaiveDate) -> Result<Vec<DiaryRow>, AppError> {
    if exceeds_future_bound(date) {
        return Err(AppError::InvalidDate(date));
    }

    debug!("read diary for {date}");
    Ok(store::find_all_by_date(pool, date).await?)
}

/// All entries with date in `[start, end]` inclusive. No bound validation.
pub async fn read_diaries(
    pool: &PgPool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DiaryRow>, AppError> {
    Ok(store::find_all_by_date_between(pool, start, end).await?)
}

/// Rewrites the text of the first entry recorded for `date`.
/// The entry's id, date, and stamped weather fields are left untouched.
pub async fn update_diary(
    pool: &PgPool,
    date: NaiveDate,
    text: &str,
) -> Result<DiaryRow, AppError> {
    let Some(mut entry) = store::find_first_by_date(pool, date).await? else {
        return Err(AppError::NotFound(format!("no diary entry for {date}")));
    };

    entry.text = text.to_string();
    store::save(pool, &entry).await?;

    info!("updated diary entry {} for {date}", entry.id);
    Ok(entry)
}

/// Removes every entry for `date`. A date with no entries is a no-op.
pub async fn delete_diary(pool: &PgPool, date: NaiveDate) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    store::delete_all_by_date(&mut *tx, date).await?;
    tx.commit().await?;

    info!("deleted diary entries for {date}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_bound_accepts_ordinary_dates() {
        assert!(!exceeds_future_bound(date(2024, 3, 10)));
        assert!(!exceeds_future_bound(date(1999, 12, 31)));
    }

    #[test]
    fn test_bound_accepts_limit_date() {
        assert!(!exceeds_future_bound(date(3050, 1, 1)));
    }

    #[test]
    fn test_bound_rejects_dates_past_limit() {
        assert!(exceeds_future_bound(date(3050, 1, 2)));
        assert!(exceeds_future_bound(date(3051, 1, 1)));
        assert!(exceeds_future_bound(date(9999, 6, 15)));
    }
}
