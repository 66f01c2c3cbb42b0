use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::*;
use crate::domain::activity::models::Activity;
use crate::domain::activity::ports::{ActivityRepository, ActivityRepositoryError};

#[derive(sqlx::FromRow)]
struct ActivityRow {
    id: Uuid,
    user_id: Uuid,
    category: String,
    created_at: DateTime<Utc>,
}

impl From<ActivityRow> for Activity {
    fn from(row: ActivityRow) -> Self {
        Activity {
            id: row.id,
            user_id: row.user_id,
            category: row.category,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ActivityRepository for PostgresDb {
    #[tracing::instrument(name = "Count activities", skip(self))]
    async fn count(&self) -> Result<u64, ActivityRepositoryError> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM activities"#)
            .fetch_one(&self.pool)
            .await
            .context("Failed to count activities.")?;

        u64::try_from(count)
            .map_err(|_| ActivityRepositoryError::InvalidRecord(format!("negative count {count}")))
    }

    #[tracing::instrument(name = "Find activities created in window", skip(self))]
    async fn find_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Activity>, ActivityRepositoryError> {
        let activities = sqlx::query_as::<_, ActivityRow>(
            r#"SELECT id, user_id, category, created_at FROM activities
            WHERE created_at >= $1 AND created_at < $2
            ORDER BY created_at"#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch activities created in window.")?
        .into_iter()
        .map(Activity::from)
        .collect();
        Ok(activities)
    }
}
