mod sqlite;

pub use sqlite::{ClimateDb, REQUIRED_COLUMNS};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;
use utoipa::ToSchema;

use crate::dates;

/// Station treated as the most active one by the temperature observation route.
pub const MOST_ACTIVE_STATION: &str = "USC00519281";

/// Precipitation keyed by measurement date. Rows sharing a date collapse to the last one read.
pub type Precipitation = BTreeMap<String, Option<f64>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct TemperatureObservation {
    /// Measurement date, YYYY-MM-DD
    pub date: String,
    /// Observed temperature
    pub tobs: f64,
}

/// Aggregates over a date-filtered set of measurements.
///
/// All three are `None` together when no measurement matched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TemperatureStats {
    pub tmin: Option<f64>,
    pub tavg: Option<f64>,
    pub tmax: Option<f64>,
}

impl TemperatureStats {
    pub fn is_empty(&self) -> bool {
        self.tmin.is_none()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Failed to format date: {0}")]
    DateFormat(#[from] time::error::Format),
    #[error("Stored measurement date is invalid: {0}")]
    StoredDate(#[from] dates::Error),
    #[error("Table `{0}` does not exist")]
    MissingTable(&'static str),
    #[error("Table `{table}` is missing required column `{column}`")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}

#[async_trait]
pub trait ClimateData: Send + Sync {
    /// Precipitation for every measurement in the year ending at the newest measurement date
    async fn precipitation_last_year(&self) -> Result<Precipitation, Error>;
    /// Every station identifier, in table order
    async fn stations(&self) -> Result<Vec<String>, Error>;
    /// Temperature observations for one station over the year ending at the
    /// newest measurement date of the whole dataset
    async fn temperature_observations_last_year(
        &self,
        station: &str,
    ) -> Result<Vec<TemperatureObservation>, Error>;
    /// Min/avg/max temperature for `start <= date`, and `date <= end` when given
    async fn temperature_stats(
        &self,
        start: Date,
        end: Option<Date>,
    ) -> Result<TemperatureStats, Error>;
}
