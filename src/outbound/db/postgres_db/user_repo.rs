use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::*;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::{credentials::StoredCredentials, user::User};
use crate::domain::user::ports::UserRepository;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}

#[async_trait]
impl UserRepository for PostgresDb {
    #[tracing::instrument(name = "Get stored credentials", skip(username, self))]
    async fn get_stored_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, UserError> {
        let account = sqlx::query_as::<_, AccountRow>(
            r#"SELECT id, username, email, created_at, password_hash
            FROM users WHERE username = $1"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to perform a query to retrieve stored credentials.")?
        .map(|row| StoredCredentials::new(row.user.into(), row.password_hash));
        Ok(account)
    }

    #[tracing::instrument(name = "Find user by id", skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserError> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"SELECT id, username, email, created_at FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by id.")?
        .map(User::from);
        Ok(user)
    }

    #[tracing::instrument(name = "Find users created in window", skip(self))]
    async fn find_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<User>, UserError> {
        let users = sqlx::query_as::<_, UserRow>(
            r#"SELECT id, username, email, created_at FROM users
            WHERE created_at >= $1 AND created_at < $2
            ORDER BY created_at"#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch users created in window.")?
        .into_iter()
        .map(User::from)
        .collect();
        Ok(users)
    }
}
