//! HTTP handlers for the client routes.
//!
//! Each handler reads the path and body, validates create and update payloads
//! before touching storage, dispatches to [`ClientService`], and writes exactly
//! one response. Failures turn into responses through [`ClientError`].

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::Response,
};
use context::Authentication;
use serde_json::Value;

use crate::{
    ClientError, ClientResult, ClientService, Item,
    envelope::{self, Deleted, Success},
    validation,
};

type Authenticated = Option<Extension<Authentication>>;
type UserSub = Result<Path<String>, PathRejection>;

/// `POST /`
pub(crate) async fn create_client(
    State(service): State<Arc<ClientService>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ClientResult<(StatusCode, Json<Success<Item>>)> {
    let client = validation::new_client(json_body(body)?)?;

    log::debug!("Creating client {}", client.user_sub());

    let item = service.create_client(client).await?;

    Ok((StatusCode::CREATED, Json(Success::new(item))))
}

/// `GET /{user_sub}`
pub(crate) async fn get_client(
    State(service): State<Arc<ClientService>>,
    user_sub: UserSub,
    authentication: Authenticated,
) -> ClientResult<Json<Success<Item>>> {
    let user_sub = path_key(user_sub)?;

    log_caller("Fetching", &user_sub, &authentication);

    let item = service.get_client(&user_sub).await?;

    Ok(Json(Success::new(item)))
}

/// `PUT /{user_sub}`
pub(crate) async fn update_client(
    State(service): State<Arc<ClientService>>,
    user_sub: UserSub,
    authentication: Authenticated,
    body: Result<Json<Value>, JsonRejection>,
) -> ClientResult<Json<Success<Item>>> {
    let user_sub = path_key(user_sub)?;
    let update = validation::client_update(json_body(body)?)?;

    log_caller("Updating", &user_sub, &authentication);

    let item = service.update_client(&user_sub, update).await?;

    Ok(Json(Success::new(item)))
}

/// `DELETE /{user_sub}`
pub(crate) async fn delete_client(
    State(service): State<Arc<ClientService>>,
    user_sub: UserSub,
    authentication: Authenticated,
) -> ClientResult<Json<Success<Deleted>>> {
    let user_sub = path_key(user_sub)?;

    log_caller("Deleting", &user_sub, &authentication);

    service.delete_client(&user_sub).await?;

    Ok(Json(Success::new(Deleted { id: user_sub })))
}

/// Known path, unknown method. Answered like an unknown path.
pub(crate) async fn unsupported_method() -> Response {
    envelope::route_not_found()
}

/// Unreadable bodies are the caller's fault, same as a missing field.
fn json_body(body: Result<Json<Value>, JsonRejection>) -> ClientResult<Value> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            log::debug!("Rejected request body: {rejection}");
            Err(ClientError::validation(rejection.body_text()))
        }
    }
}

/// A key that cannot be decoded addresses no client, so the route does not exist.
fn path_key(user_sub: UserSub) -> ClientResult<String> {
    match user_sub {
        Ok(Path(user_sub)) => Ok(user_sub),
        Err(rejection) => {
            log::debug!("Rejected client key: {rejection}");
            Err(ClientError::route_not_found())
        }
    }
}

fn log_caller(action: &str, user_sub: &str, authentication: &Authenticated) {
    let subject = authentication
        .as_ref()
        .and_then(|Extension(authentication)| authentication.subject())
        .unwrap_or("anonymous");

    log::debug!("{action} client {user_sub} on behalf of {subject}");
}
