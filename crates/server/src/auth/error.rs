#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,
    #[error("Invalid bearer token: {0}")]
    InvalidToken(String),
}
