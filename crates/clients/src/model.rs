use serde_json::{Map, Value};

/// The partition key of the client table.
pub const USER_SUB: &str = "userSub";

/// The only attribute rewritten after creation.
pub const CLIENT_NAME: &str = "clientName";

/// A stored client as a free-form attribute map.
pub type Item = Map<String, Value>;

/// A create payload that passed validation.
///
/// Holds the full payload verbatim, extra attributes included.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClient {
    user_sub: String,
    item: Item,
}

impl NewClient {
    pub(crate) fn new(user_sub: String, item: Item) -> Self {
        Self { user_sub, item }
    }

    pub fn user_sub(&self) -> &str {
        &self.user_sub
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn into_item(self) -> Item {
        self.item
    }
}

/// An update payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientUpdate {
    pub client_name: String,
}
