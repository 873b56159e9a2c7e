use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// A required query parameter was not supplied
    #[error("{0}")]
    MissingParameter(&'static str),

    #[error("{0}")]
    InvalidParameter(String),

    #[error("Upstream API returned status {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("Failed to reach upstream API: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::MissingParameter(_) | DashboardError::InvalidParameter(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

/// JSON body returned by every failing `/api` route
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// A terminal error response for one request
#[derive(Debug)]
pub struct ErrorResponse {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ErrorResponse {
    /// Parameter errors keep their own message; upstream and parse errors are
    /// reported with the route's generic `failure` message and the cause in `details`.
    pub fn from_error(err: DashboardError, failure: &str) -> Self {
        let status = err.status_code();
        if err.is_client_error() {
            tracing::warn!("Rejected request: {}", err);
            Self {
                status,
                body: ErrorBody {
                    error: err.to_string(),
                    details: None,
                },
            }
        } else {
            tracing::error!("{}: {}", failure, err);
            Self {
                status,
                body: ErrorBody {
                    error: failure.to_string(),
                    details: Some(err.to_string()),
                },
            }
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
