//! Responses for requests no handler answers, and for handlers that panic.

use std::any::Any;

use axum::response::Response;

pub(crate) async fn not_found() -> Response {
    clients::envelope::route_not_found()
}

pub(crate) fn panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    log::error!("Request handler panicked: {detail}");

    clients::envelope::internal_error()
}
