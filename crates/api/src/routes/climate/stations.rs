use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{AppState, ApiError, ErrorBody};

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Identifiers of every weather station", body = Vec<String>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query climate data", body = ErrorBody)
    ))]
pub async fn stations(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, ApiError> {
    let stations = state.climate_db.stations().await?;
    Ok(Json(stations))
}
