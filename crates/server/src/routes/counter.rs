use axum::{extract::State, Json};
use serde::Serialize;
use service::counter_service;
use tracing::{error, info};

use crate::{errors::ApiError, state::AppState};

#[derive(Debug, Serialize)]
pub struct CountOutput {
    pub row_count: u64,
}

#[derive(Debug, Serialize)]
pub struct InsertOutput {
    pub message: String,
    pub row_id: i32,
}

/// `GET /count`
pub async fn count(State(state): State<AppState>) -> Result<Json<CountOutput>, ApiError> {
    match counter_service::count_rows(&state.db).await {
        Ok(row_count) => Ok(Json(CountOutput { row_count })),
        Err(e) => {
            error!(err = %e, "count rows failed");
            Err(e.into())
        }
    }
}

/// `POST /insert`
pub async fn insert(State(state): State<AppState>) -> Result<Json<InsertOutput>, ApiError> {
    match counter_service::insert_random_row(&state.db).await {
        Ok(row_id) => {
            info!(row_id, "inserted row");
            Ok(Json(InsertOutput { message: "inserted".into(), row_id }))
        }
        Err(e) => {
            error!(err = %e, "insert row failed");
            Err(e.into())
        }
    }
}
