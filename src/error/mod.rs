use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing url parameter")]
    MissingParameter,

    /// Query string that could not be decoded (e.g. a repeated `url`).
    #[error("{0}")]
    InvalidQuery(String),

    /// Outbound page fetch failed: transport, TLS, DNS, timeout or a
    /// non-2xx upstream status.
    #[error("{0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Pin not found")]
    NotFound,

    #[error("Invalid data structure")]
    InvalidShape,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message): (StatusCode, String) = match self {
            AppError::MissingParameter => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::InvalidQuery(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Fetch(ref e) => {
                tracing::error!(error = ?e, "Page fetch failed");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            // Existing clients expect a 200 here.
            AppError::InvalidShape => (StatusCode::OK, self.to_string()),
            AppError::Internal(ref detail) => {
                tracing::error!(detail = %detail, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
