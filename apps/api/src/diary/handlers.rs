use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::diary::service;
use crate::errors::AppError;
use crate::models::diary::DiaryRow;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct DateQuery {
    pub date: NaiveDate,
}

#[derive(Deserialize)]
pub struct DateRangeQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Deserialize)]
pub struct DiaryWriteRequest {
    pub date: NaiveDate,
    pub text: String,
}

/// POST /api/v1/diary
pub async fn handle_create_diary(
    State(state): State<AppState>,
    Json(req): Json<DiaryWriteRequest>,
) -> Result<(StatusCode, Json<DiaryRow>), AppError> {
    let entry =
        service::create_diary(&state.db, state.weather.as_ref(), req.date, &req.text).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/diary?date=2024-03-10
pub async fn handle_read_diary(
    State(state): State<AppState>,
    Query(params): Query<DateQuery>,
) -> Result<Json<Vec<DiaryRow>>, AppError> {
    let entries = service::read_diary(&state.db, params.date).await?;
    Ok(Json(entries))
}

/// GET /api/v1/diaries?start=2024-03-01&end=2024-03-31
pub async fn handle_read_diaries(
    State(state): State<AppState>,
    Query(params): Query<DateRangeQuery>,
) -> Result<Json<Vec<DiaryRow>>, AppError> {
    let entries = service::read_diaries(&state.db, params.start, params.end).await?;
    Ok(Json(entries))
}

/// PATCH /api/v1/diary
pub async fn handle_update_diary(
    State(state): State<AppState>,
    Json(req): Json<DiaryWriteRequest>,
) -> Result<Json<DiaryRow>, AppError> {
    let entry = service::update_diary(&state.db, req.date, &req.text).await?;
    Ok(Json(entry))
}

/// DELETE /api/v1/diary?date=2024-03-10
pub async fn handle_delete_diary(
    State(state): State<AppState>,
    Query(params): Query<DateQuery>,
) -> Result<StatusCode, AppError> {
    service::delete_diary(&state.db, params.date).await?;
    Ok(StatusCode::NO_CONTENT)
}
