use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One journal entry with the weather stamped at creation time.
///
/// The weather fields are a denormalized copy of the snapshot that was
/// current when the entry was created; later cache refreshes do not touch
/// existing rows. Updates rewrite `text` only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DiaryRow {
    pub id: i32,
    pub date: NaiveDate,
    pub text: String,
    pub temperature: f64,
    pub condition: String,
    pub icon: String,
}
