//! Request-scoped values shared between the middleware and the handlers.

mod authentication;

pub use authentication::{AccessToken, Authentication, Claims};
