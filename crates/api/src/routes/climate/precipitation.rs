use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc};
use utoipa::ToSchema;

use crate::{AppState, ApiError, ErrorBody};

/// Precipitation per date, `null` where none was recorded
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PrecipitationByDate(pub BTreeMap<String, Option<f64>>);

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Precipitation for the 365 days ending at the newest measurement", body = PrecipitationByDate),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query climate data", body = ErrorBody)
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PrecipitationByDate>, ApiError> {
    let readings = state.climate_db.precipitation_last_year().await?;
    Ok(Json(PrecipitationByDate(readings)))
}
