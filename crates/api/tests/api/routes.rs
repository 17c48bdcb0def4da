use crate::helpers::{spawn_app, MockClimateAccess};
use axum::http::StatusCode;
use climate_api::{
    db::Error, Precipitation, TemperatureObservation, TemperatureStats, MOST_ACTIVE_STATION,
};
use serde_json::json;
use std::sync::Arc;
use time::macros::date;

#[tokio::test]
async fn index_lists_routes() {
    let climate_data = MockClimateAccess::new();
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, body) = test_app.get("/").await;
    let html = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Welcome to Hawaii Climate API!"));
    assert!(html.contains("/api/v1.0/stations"));
    assert!(html.contains("/api/v1.0/&lt;start&gt;/&lt;end&gt;"));
}

#[tokio::test]
async fn precipitation_is_an_object_keyed_by_date() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_precipitation_last_year()
        .times(1)
        .returning(|| {
            Ok(Precipitation::from([
                ("2017-08-22".to_string(), Some(0.5)),
                ("2017-08-23".to_string(), None),
            ]))
        });
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, body) = test_app.get_json("/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"2017-08-22": 0.5, "2017-08-23": null}));
}

#[tokio::test]
async fn stations_is_an_array() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_stations()
        .times(1)
        .returning(|| Ok(vec!["USC00519397".to_string(), "USC00513117".to_string()]));
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, body) = test_app.get_json("/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["USC00519397", "USC00513117"]));
}

#[tokio::test]
async fn tobs_asks_for_the_most_active_station() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_temperature_observations_last_year()
        .withf(|station| station == MOST_ACTIVE_STATION)
        .times(1)
        .returning(|_| {
            Ok(vec![TemperatureObservation {
                date: "2017-08-18".to_string(),
                tobs: 79.0,
            }])
        });
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, body) = test_app.get_json("/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"date": "2017-08-18", "tobs": 79.0}]));
}

#[tokio::test]
async fn start_date_summary() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_temperature_stats()
        .withf(|start, end| *start == date!(2017 - 01 - 01) && end.is_none())
        .times(1)
        .returning(|_, _| {
            Ok(TemperatureStats {
                tmin: Some(58.0),
                tavg: Some(74.1),
                tmax: Some(87.0),
            })
        });
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, body) = test_app.get_json("/api/v1.0/2017-01-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"Start Date": "2017-01-01", "TMIN": 58.0, "TAVG": 74.1, "TMAX": 87.0})
    );
}

#[tokio::test]
async fn start_end_summary_includes_end_date() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_temperature_stats()
        .withf(|start, end| {
            *start == date!(2016 - 08 - 23) && *end == Some(date!(2017 - 08 - 23))
        })
        .times(1)
        .returning(|_, _| {
            Ok(TemperatureStats {
                tmin: Some(59.0),
                tavg: Some(73.1),
                tmax: Some(83.0),
            })
        });
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, body) = test_app.get_json("/api/v1.0/2016-08-23/2017-08-23").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "Start Date": "2016-08-23",
            "End Date": "2017-08-23",
            "TMIN": 59.0,
            "TAVG": 73.1,
            "TMAX": 83.0
        })
    );
}

#[tokio::test]
async fn malformed_dates_never_reach_the_database() {
    let mut climate_data = MockClimateAccess::new();
    climate_data.expect_temperature_stats().never();
    let test_app = spawn_app(Arc::new(climate_data)).await;

    for uri in [
        "/api/v1.0/not-a-date",
        "/api/v1.0/2017-1-1",
        "/api/v1.0/2017%2F01%2F01",
        "/api/v1.0/2017-02-30",
        "/api/v1.0/2017-01-01/soon",
        "/api/v1.0/yesterday/2017-01-01",
        "/api/v1.0/%FF",
        "/api/v1.0/2017-01-01/%FF",
        "/api/v1.0/%FF/2017-01-01",
    ] {
        let (status, body) = test_app.get_json(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(
            body,
            json!({"error": "Invalid date format. Use YYYY-MM-DD."}),
            "{uri}"
        );
    }
}

#[tokio::test]
async fn empty_stats_are_not_found() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_temperature_stats()
        .times(2)
        .returning(|_, _| Ok(TemperatureStats::default()));
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, body) = test_app.get_json("/api/v1.0/9999-01-01").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "No data available from 9999-01-01"}));

    let (status, body) = test_app.get_json("/api/v1.0/2017-08-23/2016-08-23").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"error": "No data available from 2017-08-23 to 2016-08-23"})
    );
}

#[tokio::test]
async fn data_failures_are_server_errors() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_stations()
        .times(1)
        .returning(|| Err(Error::MissingTable("station")));
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, body) = test_app.get_json("/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to query climate data"}));
}

#[tokio::test]
async fn docs_are_served() {
    let climate_data = MockClimateAccess::new();
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, _) = test_app.get("/docs").await;

    assert_eq!(status, StatusCode::OK);
}
