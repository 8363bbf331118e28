//! Required-field rules for create and update payloads.
//!
//! Both functions consume the raw JSON body and hand back a typed payload, so a
//! storage call can only ever be made with input that passed these rules. The
//! first violated rule wins.

use serde_json::Value;

use crate::{
    ClientError, ClientResult,
    model::{CLIENT_NAME, ClientUpdate, Item, NewClient, USER_SUB},
};

/// Checks a create payload: `userSub` then `clientName`, both non-empty strings.
///
/// Any other attributes are kept as they are.
pub fn new_client(body: Value) -> ClientResult<NewClient> {
    let item = into_object(body)?;

    let user_sub = required_string(&item, USER_SUB)?.to_owned();
    required_string(&item, CLIENT_NAME)?;

    Ok(NewClient::new(user_sub, item))
}

/// Checks an update payload: `clientName` must be a non-empty string.
///
/// The client is addressed by the path, so a `userSub` in the body is ignored.
pub fn client_update(body: Value) -> ClientResult<ClientUpdate> {
    let item = into_object(body)?;
    let client_name = required_string(&item, CLIENT_NAME)?.to_owned();

    Ok(ClientUpdate { client_name })
}

fn into_object(body: Value) -> ClientResult<Item> {
    match body {
        Value::Object(item) => Ok(item),
        _ => Err(ClientError::validation("\"value\" must be of type object")),
    }
}

fn required_string<'a>(item: &'a Item, field: &str) -> ClientResult<&'a str> {
    match item.get(field) {
        None => Err(ClientError::validation(format!("\"{field}\" is required"))),
        Some(Value::String(value)) if value.is_empty() => Err(ClientError::validation(format!(
            "\"{field}\" is not allowed to be empty"
        ))),
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(ClientError::validation(format!("\"{field}\" must be a string"))),
    }
}
