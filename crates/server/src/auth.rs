mod error;
mod jwt;
mod layer;

pub(crate) use layer::*;

type AuthResult<T> = Result<T, error::AuthError>;
