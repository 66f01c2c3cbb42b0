use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::activity::models::Activity;
use crate::domain::activity::ports::{ActivityRepository, ActivityRepositoryError};
use crate::domain::email::{EmailMessage, Mailer, MailerError};
use crate::domain::summary::errors::SummaryError;
use crate::domain::summary::models::SummaryReport;
use crate::domain::summary::ports::SummaryRenderer;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::credentials::StoredCredentials;
use crate::domain::user::models::user::User;
use crate::domain::user::ports::UserRepository;

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<(User, Option<String>)>>,
}

impl InMemoryUsers {
    pub fn add(&self, username: &str, created_at: DateTime<Utc>) -> User {
        let user = User::new(username, created_at);
        self.users.lock().unwrap().push((user.clone(), None));
        user
    }

    pub fn add_with_password_hash(&self, username: &str, password_hash: String) -> User {
        let user = User::new(username, Utc::now());
        self.users
            .lock()
            .unwrap()
            .push((user.clone(), Some(password_hash)));
        user
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn get_stored_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u.username == username)
            .and_then(|(u, hash)| {
                hash.clone()
                    .map(|hash| StoredCredentials::new(u.clone(), hash))
            }))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(u, _)| u.clone()))
    }

    async fn find_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| from <= u.created_at && u.created_at < to)
            .map(|(u, _)| u.clone())
            .collect())
    }
}

/// Wraps a repository and records the peak number of concurrent lookups.
pub struct CountingUsers {
    inner: InMemoryUsers,
    in_flight: AtomicUsize,
    peak: Arc<AtomicUsize>,
}

impl CountingUsers {
    pub fn new(inner: InMemoryUsers) -> Self {
        Self {
            inner,
            in_flight: AtomicUsize::new(0),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn peak(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.peak)
    }
}

#[async_trait]
impl UserRepository for CountingUsers {
    async fn get_stored_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, UserError> {
        self.inner.get_stored_credentials(username).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(current, Ordering::SeqCst);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let user = self.inner.find_by_id(id).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        user
    }

    async fn find_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<User>, UserError> {
        self.inner.find_created_between(from, to).await
    }
}

#[derive(Default)]
pub struct InMemoryActivities {
    activities: Vec<Activity>,
    failing: bool,
}

impl InMemoryActivities {
    pub fn new(activities: Vec<Activity>) -> Self {
        Self {
            activities,
            failing: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            activities: vec![],
            failing: true,
        }
    }

    fn check(&self) -> Result<(), ActivityRepositoryError> {
        if self.failing {
            return Err(ActivityRepositoryError::Unexpected(anyhow::anyhow!(
                "connection refused"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ActivityRepository for InMemoryActivities {
    async fn count(&self) -> Result<u64, ActivityRepositoryError> {
        self.check()?;
        Ok(self.activities.len() as u64)
    }

    async fn find_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Activity>, ActivityRepositoryError> {
        self.check()?;
        Ok(self
            .activities
            .iter()
            .filter(|a| from <= a.created_at && a.created_at < to)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    failing: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            failing: true,
        }
    }

    pub fn sent(&self) -> Arc<Mutex<Vec<EmailMessage>>> {
        Arc::clone(&self.sent)
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        if self.failing {
            return Err(MailerError::Unexpected(anyhow::anyhow!("mailbox unavailable")));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Renders `username=quantity` lines followed by the host.
pub struct StubRenderer;

impl SummaryRenderer for StubRenderer {
    fn render(&self, summary: &SummaryReport, host: &str) -> Result<String, SummaryError> {
        let mut body = String::new();
        for user in &summary.users {
            writeln!(body, "{}={}", user.username, user.quantity).unwrap();
        }
        writeln!(body, "{}", host).unwrap();
        Ok(body)
    }
}
