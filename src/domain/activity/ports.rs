use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::models::Activity;

#[async_trait]
pub trait ActivityRepository: Send + Sync + 'static {
    /// Number of activities ever recorded.
    async fn count(&self) -> Result<u64, ActivityRepositoryError>;

    /// Activities created inside the half-open `[from, to)` interval.
    async fn find_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Activity>, ActivityRepositoryError>;
}

#[derive(thiserror::Error, Debug)]
pub enum ActivityRepositoryError {
    #[error("Invalid activity record: {0}")]
    InvalidRecord(String),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}
