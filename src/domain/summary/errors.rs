use crate::domain::activity::ports::ActivityRepositoryError;
use crate::domain::email::{EmailError, MailerError};
use crate::domain::user::errors::UserError;

#[derive(thiserror::Error, Debug)]
pub enum SummaryError {
    #[error("Failed to load activities: {0}")]
    Activities(#[from] ActivityRepositoryError),
    #[error("Failed to load users: {0}")]
    Users(#[from] UserError),
    #[error("Failed to render summary: {0}")]
    Render(String),
    #[error("Invalid summary email: {0}")]
    InvalidEmail(#[from] EmailError),
    #[error("Failed to send summary: {0}")]
    Mail(#[from] MailerError),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}
