use chrono::NaiveDate;
use sqlx::PgExecutor;

use crate::models::weather::DateWeatherRow;

/// Returns every cached snapshot for `date`. Normally zero or one row, but
/// duplicates are tolerated and callers take the first match.
pub async fn find_by_date(
    executor: impl PgExecutor<'_>,
    date: NaiveDate,
) -> Result<Vec<DateWeatherRow>, sqlx::Error> {
    sqlx::query_as::<_, DateWeatherRow>(
        "SELECT date, temperature, condition, icon FROM date_weather WHERE date = $1",
    )
    .bind(date)
    .fetch_all(executor)
    .await
}

/// Inserts a snapshot unconditionally. There is no uniqueness constraint on
/// `date`; a second write for the same day simply adds another row.
pub async fn save(
    executor: impl PgExecutor<'_>,
    row: &DateWeatherRow,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO date_weather (date, temperature, condition, icon) VALUES ($1, $2, $3, $4)",
    )
    .bind(row.date)
    .bind(row.temperature)
    .bind(&row.condition)
    .bind(&row.icon)
    .execute(executor)
    .await?;

    Ok(())
}
