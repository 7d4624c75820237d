//! Error types and handling for the `/query` proxy
//!
//! Bodies are plain text: the query form shows the raw body of a failed
//! request as the answer.

use axum::{
    http::{StatusCode, header},
    response::IntoResponse,
};
use thiserror::Error;

use crate::core::query_client::RequestFailure;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unable to parse JSON.")]
    InvalidJson,

    #[error("Missing query parameter 'q'.")]
    MissingQuery,

    #[error("Cannot connect to answer engine")]
    EngineUnavailable,

    #[error("{0}")]
    Engine(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson | ApiError::MissingQuery => StatusCode::BAD_REQUEST,
            ApiError::EngineUnavailable | ApiError::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RequestFailure> for ApiError {
    fn from(failure: RequestFailure) -> Self {
        match failure {
            RequestFailure::Transport(e) if e.is_connect() || e.is_timeout() => {
                ApiError::EngineUnavailable
            }
            RequestFailure::Transport(e) => ApiError::Engine(e.to_string()),
            RequestFailure::Status { status, body } if body.trim().is_empty() => {
                ApiError::Engine(format!("Answer engine returned status {status}"))
            }
            RequestFailure::Status { body, .. } => ApiError::Engine(body),
            RequestFailure::MalformedBody { source, .. } => {
                ApiError::Engine(format!("Unreadable answer from engine: {source}"))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}
