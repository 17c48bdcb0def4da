use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    SqliteConnection,
};
use std::time::Duration;
use time::Date;

use super::{ClimateData, Error, Precipitation, TemperatureObservation, TemperatureStats};
use crate::dates::{format_date, parse_date, year_before};

/// Columns the queries depend on, per table.
pub const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("station", &["station"]),
    ("measurement", &["station", "date", "prcp", "tobs"]),
];

/// Process-wide handle on the climate dataset.
///
/// Opened once at startup, shared by every request, closed on shutdown.
#[derive(Clone)]
pub struct ClimateDb {
    pool: SqlitePool,
}

impl ClimateDb {
    /// Opens the dataset read-only and checks it has what the routes need.
    pub async fn open(path: &str) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false)
            .pragma("busy_timeout", "5000");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open climate database at {}", path))?;

        let db = Self::from_pool(pool);
        db.health_check().await?;
        db.validate_schema()
            .await
            .context("Climate database schema check failed")?;
        info!("SQLite climate database opened at: {}", path);

        Ok(db)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check database connectivity and integrity.
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("Database connectivity check failed")?;

        let result: String = sqlx::query_scalar("PRAGMA quick_check;")
            .fetch_one(&self.pool)
            .await
            .context("Database integrity check failed")?;
        if result != "ok" {
            return Err(anyhow!("Database integrity check failed: {}", result));
        }

        Ok(())
    }

    /// Fails on the first table or column listed in [`REQUIRED_COLUMNS`] that the file lacks.
    pub async fn validate_schema(&self) -> Result<(), Error> {
        let mut conn = self.pool.acquire().await?;

        for &(table, columns) in REQUIRED_COLUMNS {
            let present: Vec<String> =
                sqlx::query_scalar("SELECT name FROM pragma_table_info(?1)")
                    .bind(table)
                    .fetch_all(&mut *conn)
                    .await?;
            if present.is_empty() {
                return Err(Error::MissingTable(table));
            }
            if let Some(&column) = columns
                .iter()
                .find(|&&column| !present.iter().any(|name| name == column))
            {
                return Err(Error::MissingColumn { table, column });
            }
            debug!("table {} has columns {:?}", table, present);
        }

        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("SQLite climate database closed");
    }
}

/// Lower bound of the "last 12 months" window, or `None` when there are no measurements.
async fn last_year_cutoff(conn: &mut SqliteConnection) -> Result<Option<String>, Error> {
    let latest: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
        .fetch_one(&mut *conn)
        .await?;

    match latest {
        Some(latest) => {
            let cutoff = year_before(parse_date(&latest)?);
            Ok(Some(format_date(cutoff)?))
        }
        None => Ok(None),
    }
}

#[async_trait]
impl ClimateData for ClimateDb {
    async fn precipitation_last_year(&self) -> Result<Precipitation, Error> {
        let mut conn = self.pool.acquire().await?;
        let Some(cutoff) = last_year_cutoff(&mut conn).await? else {
            return Ok(Precipitation::new());
        };

        let rows: Vec<(String, Option<f64>)> =
            sqlx::query_as("SELECT date, CAST(prcp AS REAL) FROM measurement WHERE date >= ?1")
                .bind(cutoff)
                .fetch_all(&mut *conn)
                .await?;

        Ok(rows.into_iter().collect())
    }

    async fn stations(&self) -> Result<Vec<String>, Error> {
        let stations = sqlx::query_scalar("SELECT station FROM station")
            .fetch_all(&self.pool)
            .await?;
        Ok(stations)
    }

    async fn temperature_observations_last_year(
        &self,
        station: &str,
    ) -> Result<Vec<TemperatureObservation>, Error> {
        let mut conn = self.pool.acquire().await?;
        let Some(cutoff) = last_year_cutoff(&mut conn).await? else {
            return Ok(vec![]);
        };

        let observations = sqlx::query_as(
            "SELECT date, CAST(tobs AS REAL) AS tobs
             FROM measurement
             WHERE station = ?1 AND date >= ?2",
        )
        .bind(station)
        .bind(cutoff)
        .fetch_all(&mut *conn)
        .await?;

        Ok(observations)
    }

    async fn temperature_stats(
        &self,
        start: Date,
        end: Option<Date>,
    ) -> Result<TemperatureStats, Error> {
        let sql = if end.is_some() {
            "SELECT CAST(MIN(tobs) AS REAL), AVG(tobs), CAST(MAX(tobs) AS REAL)
             FROM measurement
             WHERE date >= ?1 AND date <= ?2"
        } else {
            "SELECT CAST(MIN(tobs) AS REAL), AVG(tobs), CAST(MAX(tobs) AS REAL)
             FROM measurement
             WHERE date >= ?1"
        };

        let mut query = sqlx::query_as::<_, (Option<f64>, Option<f64>, Option<f64>)>(sql)
            .bind(format_date(start)?);
        if let Some(end) = end {
            query = query.bind(format_date(end)?);
        }
        let (tmin, tavg, tmax) = query.fetch_one(&self.pool).await?;

        Ok(TemperatureStats { tmin, tavg, tmax })
    }
}
