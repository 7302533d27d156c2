//! Request errors and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ephemeris::EphemerisError;
use skychart::ChartError;
use thiserror::Error;

/// Body sent for every failed star map request
pub const GENERIC_ERROR_BODY: &str = "Internal Server Error";

/// Errors raised while serving a star map request.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A query parameter could not be interpreted.
    #[error("Invalid query parameter '{field}': {reason}")]
    InvalidQuery { field: &'static str, reason: String },

    /// Date and time did not form a valid observation instant.
    #[error("Invalid observation time: {0}")]
    Observation(#[from] EphemerisError),

    /// The chart could not be drawn or encoded.
    #[error("Chart rendering failed: {0}")]
    Render(#[from] ChartError),
}

/// Standard Result type for request handling.
pub type Result<T> = std::result::Result<T, ServerError>;

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!("Star map request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_BODY).into_response()
    }
}
