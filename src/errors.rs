use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failures reported by the item store. The `Display` text is what clients see.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    #[error("item already exists")]
    AlreadyExists,

    #[error("item not found")]
    NotFound,
}

/// Errors returned from HTTP handlers.
///
/// Each handler picks the variant, so the same store error can map to
/// different statuses on different routes.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Returns `400 Bad Request`
    #[error("{0}")]
    BadRequest(String),

    /// Returns `404 Not Found`
    #[error("{0}")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        tracing::debug!("Rejecting request with {}: {}", status, self);

        // Plain-text message terminated by a newline.
        (status, format!("{self}\n")).into_response()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
