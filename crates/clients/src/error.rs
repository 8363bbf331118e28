use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use thiserror::Error;

use crate::{
    envelope::{self, Failure},
    store::StoreError,
};

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Message returned whenever the addressed client does not exist.
pub const NOT_FOUND_MESSAGE: &str = "Client not found";

/// Everything the client pipeline can fail with.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The payload broke a required-field or type rule. The message reaches the caller verbatim.
    #[error("{0}")]
    Validation(String),

    /// The addressed client does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Storage or transport failure. Never shown to the caller.
    #[error("Internal server error")]
    Unhandled(#[from] StoreError),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound(NOT_FOUND_MESSAGE.to_string())
    }

    /// Same body as the unmatched-route fallback.
    pub fn route_not_found() -> Self {
        Self::NotFound(envelope::ROUTE_NOT_FOUND_MESSAGE.to_string())
    }

    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unhandled(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ClientError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            Self::Validation(message) | Self::NotFound(message) => (status, Json(Failure::new(message))).into_response(),
            Self::Unhandled(source) => {
                log::error!("Unhandled error while serving a client request: {source}");
                envelope::internal_error()
            }
        }
    }
}
