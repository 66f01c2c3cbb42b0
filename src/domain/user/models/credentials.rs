use crate::domain::user::errors::UserError;
use crate::domain::user::models::user::User;
use crate::outbound::telemetry::spawn_blocking_with_tracing;
use anyhow::Context;
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use once_cell::sync::Lazy;
use secrecy::{ExposeSecret, Secret};

/// Username and password presented by a request. `Secret` keeps the
/// password out of `Debug` output.
#[derive(Debug)]
pub struct Credentials {
    username: String,
    password: Secret<String>,
}

/// A user account together with its stored password hash.
pub struct StoredCredentials {
    user: User,
    password_hash: Secret<String>,
}

// Hash of no real password. Unknown usernames are checked against it so a
// lookup miss costs as much as a wrong password.
static FALLBACK_PASSWORD_HASH: Lazy<Secret<String>> = Lazy::new(|| {
    Secret::new(
        "$argon2id$v=19$m=15000,t=2,p=1$\
    gZiV/M1gPc22ElAH/Jh1Hw$\
    CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno"
            .to_string(),
    )
});

impl Credentials {
    pub fn new(username: String, password: String) -> Self {
        Self {
            username,
            password: Secret::new(password),
        }
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Checks the password against `account` and hands back its user.
    #[tracing::instrument(
        name = "Authenticate user",
        skip(self, account),
        fields(username = %self.username)
    )]
    pub async fn authenticate(self, account: Option<StoredCredentials>) -> Result<User, UserError> {
        let (user, password_hash) = match account {
            Some(account) => (Some(account.user), account.password_hash),
            None => (None, FALLBACK_PASSWORD_HASH.clone()),
        };
        let password = self.password;

        spawn_blocking_with_tracing(move || verify_password(&password_hash, &password))
            .await
            .context("Failed to spawn a blocking task.")
            .map_err(UserError::Unexpected)??;

        user.ok_or_else(|| UserError::AuthError(format!("Unknown username {}", self.username)))
    }
}

impl StoredCredentials {
    pub fn new(user: User, password_hash: String) -> Self {
        Self {
            user,
            password_hash: Secret::new(password_hash),
        }
    }
}

fn verify_password(
    password_hash: &Secret<String>,
    candidate: &Secret<String>,
) -> Result<(), UserError> {
    let expected = PasswordHash::new(password_hash.expose_secret())
        .context("Stored password hash is not a PHC string.")
        .map_err(UserError::Unexpected)?;

    Argon2::default()
        .verify_password(candidate.expose_secret().as_bytes(), &expected)
        .map_err(|_| UserError::AuthError("Invalid password".to_string()))
}
