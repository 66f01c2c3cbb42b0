#[derive(thiserror::Error, Debug)]
pub enum UserError {
    #[error("Authentication error: {0}")]
    AuthError(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}
