pub mod models;
pub mod ports;

pub use models::{EmailAddress, EmailError, EmailMessage};
pub use ports::{Mailer, MailerError};
