use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{debug, error};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{dates, db};

/// Body of every non-2xx JSON response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Invalid date format. Use YYYY-MM-DD.")]
    InvalidDate(#[source] dates::Error),
    #[error("No data available from {0}")]
    NoDataFrom(String),
    #[error("No data available from {0} to {1}")]
    NoDataBetween(String, String),
    #[error("Failed to query climate data")]
    Data(#[from] db::Error),
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidDate(dates::Error::Undecodable(rejection.body_text()))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidDate(_) => StatusCode::BAD_REQUEST,
            ApiError::NoDataFrom(_) | ApiError::NoDataBetween(_, _) => StatusCode::NOT_FOUND,
            ApiError::Data(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::InvalidDate(e) => debug!("rejected date parameter: {}", e),
            ApiError::Data(e) => error!("error querying climate data: {}", e),
            _ => {}
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
