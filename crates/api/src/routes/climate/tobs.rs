use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{AppState, ApiError, ErrorBody, TemperatureObservation, MOST_ACTIVE_STATION};

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Last year of temperature observations at the most active station", body = Vec<TemperatureObservation>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query climate data", body = ErrorBody)
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureObservation>>, ApiError> {
    let observations = state
        .climate_db
        .temperature_observations_last_year(MOST_ACTIVE_STATION)
        .await?;
    Ok(Json(observations))
}
