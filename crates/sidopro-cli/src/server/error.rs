use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde_json::json;
use sidopro_core::{GeocodeError, ProgressError};
use thiserror::Error;

/// Handler failure rendered as `{"error": "..."}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Progress(#[from] ProgressError),

    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error("Invalid query string: {0}")]
    Query(#[from] QueryRejection),

    #[error("Not found")]
    NotFound,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Progress(e) => match e {
                ProgressError::UnknownProject { .. }
                | ProgressError::InvalidInput { .. }
                | ProgressError::StageNotFound { .. } => StatusCode::BAD_REQUEST,
                ProgressError::ReportNotFound { .. } => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Geocode(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ApiError::Query(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{self}");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
