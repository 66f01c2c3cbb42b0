use async_trait::async_trait;

use super::models::{EmailError, EmailMessage};

/// Outgoing mail transport.
///
/// `send` resolves once the transport accepted the message and fails with
/// the transport's error otherwise.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError>;
}

#[derive(thiserror::Error, Debug)]
pub enum MailerError {
    #[error("Invalid email message: {0}")]
    InvalidMessage(#[from] EmailError),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}
