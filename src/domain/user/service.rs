use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::errors::UserError;
use super::models::{credentials::Credentials, user::User};
use super::ports::{UserRepository, UserService};
use crate::domain::activity::models::{Activity, EnrichedActivity};

use std::sync::Arc;

#[derive(Debug)]
pub struct UserDirectory<R>
where
    R: UserRepository,
{
    pub repo: Arc<R>,
}

impl<R> UserDirectory<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> Clone for UserDirectory<R>
where
    R: UserRepository,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

#[async_trait]
impl<R> UserService for UserDirectory<R>
where
    R: UserRepository,
{
    #[tracing::instrument(
        name = "Get user from credentials",
        skip(self, credentials),
        fields(username = %credentials.username(), user_id = tracing::field::Empty)
    )]
    async fn get_user_from_credentials(
        &self,
        credentials: Credentials,
    ) -> Result<User, UserError> {
        let account = self
            .repo
            .get_stored_credentials(credentials.username())
            .await?;

        let user = credentials.authenticate(account).await?;
        tracing::Span::current().record("user_id", tracing::field::display(&user.id));

        Ok(user)
    }

    async fn inject_user(&self, activity: Activity) -> Result<EnrichedActivity, UserError> {
        let user = self.repo.find_by_id(activity.user_id).await?;
        if user.is_none() {
            tracing::warn!(
                activity_id = %activity.id,
                user_id = %activity.user_id,
                "Activity references a user that does not exist",
            );
        }
        Ok(EnrichedActivity::new(activity, user))
    }

    async fn find_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<User>, UserError> {
        self.repo.find_created_between(from, to).await
    }
}
