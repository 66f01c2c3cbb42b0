pub mod credentials;
pub mod user;
