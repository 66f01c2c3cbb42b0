use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::user::models::user::User;

/// Username used to tally activities whose user no longer exists.
pub const UNKNOWN_USERNAME: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    pub fn new(user_id: Uuid, category: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            category: category.into(),
            created_at,
        }
    }
}

/// An activity with its owner resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedActivity {
    pub activity: Activity,
    pub user: Option<User>,
}

impl EnrichedActivity {
    pub fn new(activity: Activity, user: Option<User>) -> Self {
        Self { activity, user }
    }

    pub fn username(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.username.as_str())
            .unwrap_or(UNKNOWN_USERNAME)
    }

    pub fn category(&self) -> &str {
        &self.activity.category
    }
}
