//! The uniform `{success, data|message}` wrappers every endpoint answers with.

use std::borrow::Cow;

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde::Serialize;

/// Message of the generic 500 fallback.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";

/// Message of the unmatched-route fallback.
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Not found";

/// `{success: true, data}`
#[derive(Debug, Serialize)]
pub struct Success<T> {
    success: bool,
    data: T,
}

impl<T> Success<T> {
    pub fn new(data: T) -> Self {
        Self { success: true, data }
    }
}

/// `{success: false, message}`
#[derive(Debug, Serialize)]
pub struct Failure {
    success: bool,
    message: Cow<'static, str>,
}

impl Failure {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// `{success: false, message: "Internal server error", data: null}`
#[derive(Debug, Serialize)]
pub struct InternalError {
    success: bool,
    message: &'static str,
    data: Option<()>,
}

impl Default for InternalError {
    fn default() -> Self {
        Self {
            success: false,
            message: INTERNAL_SERVER_ERROR_MESSAGE,
            data: None,
        }
    }
}

/// Body of a successful delete.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: String,
}

/// 404 for paths and methods no route answers.
pub fn route_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(Failure::new(ROUTE_NOT_FOUND_MESSAGE))).into_response()
}

/// 500 with no detail about the cause.
pub fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(InternalError::default())).into_response()
}
