use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{dates::parse_date, AppState, ApiError, ErrorBody, TemperatureStats};

/// Temperature aggregates for a date range, keyed the way existing clients read them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TemperatureSummary {
    #[serde(rename = "End Date", default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(rename = "Start Date")]
    pub start_date: String,
    #[serde(rename = "TAVG")]
    pub tavg: Option<f64>,
    #[serde(rename = "TMAX")]
    pub tmax: Option<f64>,
    #[serde(rename = "TMIN")]
    pub tmin: Option<f64>,
}

impl TemperatureSummary {
    fn new(start_date: String, end_date: Option<String>, stats: TemperatureStats) -> Self {
        Self {
            end_date,
            start_date,
            tavg: stats.tavg,
            tmax: stats.tmax,
            tmin: stats.tmin,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
        ("start" = String, Path, description = "First day to include, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "TMIN/TAVG/TMAX for every measurement on or after start", body = TemperatureSummary),
        (status = BAD_REQUEST, description = "Start is not a YYYY-MM-DD date", body = ErrorBody),
        (status = NOT_FOUND, description = "No measurements on or after start", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query climate data", body = ErrorBody)
    ))]
pub async fn temperature_from(
    State(state): State<Arc<AppState>>,
    start: Result<Path<String>, PathRejection>,
) -> Result<Json<TemperatureSummary>, ApiError> {
    let Path(start) = start?;
    let start_date = parse_date(&start).map_err(ApiError::InvalidDate)?;

    let stats = state.climate_db.temperature_stats(start_date, None).await?;
    if stats.is_empty() {
        return Err(ApiError::NoDataFrom(start));
    }

    Ok(Json(TemperatureSummary::new(start, None, stats)))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
        ("start" = String, Path, description = "First day to include, YYYY-MM-DD"),
        ("end" = String, Path, description = "Last day to include, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "TMIN/TAVG/TMAX for every measurement between start and end inclusive", body = TemperatureSummary),
        (status = BAD_REQUEST, description = "Start or end is not a YYYY-MM-DD date", body = ErrorBody),
        (status = NOT_FOUND, description = "No measurements in the range", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query climate data", body = ErrorBody)
    ))]
pub async fn temperature_between(
    State(state): State<Arc<AppState>>,
    range: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<TemperatureSummary>, ApiError> {
    let Path((start, end)) = range?;
    let start_date = parse_date(&start).map_err(ApiError::InvalidDate)?;
    let end_date = parse_date(&end).map_err(ApiError::InvalidDate)?;

    // start > end is not an input error, the range just matches nothing
    let stats = state
        .climate_db
        .temperature_stats(start_date, Some(end_date))
        .await?;
    if stats.is_empty() {
        return Err(ApiError::NoDataBetween(start, end));
    }

    Ok(Json(TemperatureSummary::new(start, Some(end), stats)))
}
