use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::UserError;
use super::models::{
    credentials::{Credentials, StoredCredentials},
    user::User,
};
use crate::domain::activity::models::{Activity, EnrichedActivity};

#[async_trait]
/// Represents a store of user records
pub trait UserRepository: Send + Sync + 'static {
    async fn get_stored_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, UserError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserError>;

    /// Users created inside the half-open `[from, to)` interval.
    async fn find_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<User>, UserError>;
}

#[async_trait]
pub trait UserService: Send + Sync + 'static {
    /// Resolves the user owning a set of request credentials.
    async fn get_user_from_credentials(&self, credentials: Credentials)
        -> Result<User, UserError>;

    /// Attaches the referenced user to an activity. A dangling reference is
    /// not an error: the activity comes back without a user.
    async fn inject_user(&self, activity: Activity) -> Result<EnrichedActivity, UserError>;

    async fn find_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<User>, UserError>;
}
