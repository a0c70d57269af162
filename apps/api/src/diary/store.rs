use chrono::NaiveDate;
use sqlx::PgExecutor;

use crate::models::diary::DiaryRow;
use crate::models::weather::WeatherReport;

pub async fn find_all_by_date(
    executor: impl PgExecutor<'_>,
    date: NaiveDate,
) -> Result<Vec<DiaryRow>, sqlx::Error> {
    sqlx::query_as::<_, DiaryRow>(
        "SELECT id, date, text, temperature, condition, icon FROM diary \
         WHERE date = $1 ORDER BY id",
    )
    .bind(date)
    .fetch_all(executor)
    .await
}

/// Entries with date in `[start, end]`, inclusive both ends.
pub async fn find_all_by_date_between(
    executor: impl PgExecutor<'_>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DiaryRow>, sqlx::Error> {
    sqlx::query_as::<_, DiaryRow>(
        "SELECT id, date, text, temperature, condition, icon FROM diary \
         WHERE date BETWEEN $1 AND $2 ORDER BY date, id",
    )
    .bind(start)
    .bind(end)
    .fetch_all(executor)
    .await
}

/// The earliest-created entry for `date`, if any.
pub async fn find_first_by_date(
    executor: impl PgExecutor<'_>,
    date: NaiveDate,
) -> Result<Option<DiaryRow>, sqlx::Error> {
    sqlx::query_as::<_, DiaryRow>(
        "SELECT id, date, text, temperature, condition, icon FROM diary \
         WHERE date = $1 ORDER BY id LIMIT 1",
    )
    .bind(date)
    .fetch_optional(executor)
    .await
}

/// Inserts a new entry and returns it with the generated id.
pub async fn insert(
    executor: impl PgExecutor<'_>,
    date: NaiveDate,
    text: &str,
    weather: &WeatherReport,
) -> Result<DiaryRow, sqlx::Error> {
    sqlx::query_as::<_, DiaryRow>(
        "INSERT INTO diary (date, text, temperature, condition, icon) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, date, text, temperature, condition, icon",
    )
    .bind(date)
    .bind(text)
    .bind(weather.temperature)
    .bind(&weather.condition)
    .bind(&weather.icon)
    .fetch_one(executor)
    .await
}

/// Upsert keyed on id: a row that already exists is overwritten in place.
/// The update flow relies on this to rewrite an entry's text while keeping
/// its id.
pub async fn save(executor: impl PgExecutor<'_>, entry: &DiaryRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO diary (id, date, text, temperature, condition, icon) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         ON CONFLICT (id) DO UPDATE \
         SET date = EXCLUDED.date, \
             text = EXCLUDED.text, \
             temperature = EXCLUDED.temperature, \
             condition = EXCLUDED.condition, \
             icon = EXCLUDED.icon",
    )
    .bind(entry.id)
    .bind(entry.date)
    .bind(&entry.text)
    .bind(entry.temperature)
    .bind(&entry.condition)
    .bind(&entry.icon)
    .execute(executor)
    .await?;

    Ok(())
}

/// Removes every entry for `date`. Zero rows affected is not an error.
pub async fn delete_all_by_date(
    executor: impl PgExecutor<'_>,
    date: NaiveDate,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM diary WHERE date = $1")
        .bind(date)
        .execute(executor)
        .await?;

    Ok(())
}
