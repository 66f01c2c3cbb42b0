use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;

use super::errors::SummaryError;
use super::models::{ReportWindow, SummaryReport};
use super::ports::{SummaryRenderer, SummaryService};
use crate::domain::activity::models::EnrichedActivity;
use crate::domain::activity::ports::ActivityRepository;
use crate::domain::email::models::{EmailAddress, EmailHtmlContent, EmailMessage, EmailSubject};
use crate::domain::email::ports::Mailer;
use crate::domain::user::models::user::User;
use crate::domain::user::ports::UserService;

pub const SUMMARY_EMAIL_SUBJECT: &str = "Today's summary";
pub const DEFAULT_ENRICHMENT_CONCURRENCY: usize = 10;

#[derive(Debug, Clone)]
pub struct ReporterSettings {
    pub admin_email: EmailAddress,
    pub host: String,
    pub concurrency: usize,
}

impl ReporterSettings {
    pub fn new(admin_email: EmailAddress, host: String) -> Self {
        Self {
            admin_email,
            host,
            concurrency: DEFAULT_ENRICHMENT_CONCURRENCY,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// Aggregates the day's activity and mails it to the administrators.
pub struct SummaryReporter<A, U, R, M>
where
    A: ActivityRepository,
    U: UserService,
    R: SummaryRenderer,
    M: Mailer,
{
    pub activities: Arc<A>,
    pub users: Arc<U>,
    pub renderer: Arc<R>,
    pub mailer: Arc<M>,
    settings: ReporterSettings,
}

impl<A, U, R, M> SummaryReporter<A, U, R, M>
where
    A: ActivityRepository,
    U: UserService,
    R: SummaryRenderer,
    M: Mailer,
{
    pub fn new(
        activities: Arc<A>,
        users: Arc<U>,
        renderer: Arc<R>,
        mailer: Arc<M>,
        settings: ReporterSettings,
    ) -> Self {
        Self {
            activities,
            users,
            renderer,
            mailer,
            settings,
        }
    }

    async fn get_total_activities(&self) -> Result<u64, SummaryError> {
        Ok(self.activities.count().await?)
    }

    #[tracing::instrument(name = "Load activities in window", skip(self))]
    async fn get_activities(
        &self,
        window: ReportWindow,
    ) -> Result<Vec<EnrichedActivity>, SummaryError> {
        let activities = self
            .activities
            .find_created_between(window.from(), window.to())
            .await?;

        let users = &self.users;
        let enriched = stream::iter(activities)
            .map(|activity| users.inject_user(activity))
            .buffered(self.settings.concurrency.max(1))
            .try_collect()
            .await?;

        Ok(enriched)
    }

    async fn get_new_users(&self, window: ReportWindow) -> Result<Vec<User>, SummaryError> {
        Ok(self
            .users
            .find_created_between(window.from(), window.to())
            .await?)
    }

    #[tracing::instrument(name = "Send summary email", skip(self, summary))]
    async fn send_email(&self, summary: &SummaryReport) -> Result<(), SummaryError> {
        let html = self.renderer.render(summary, &self.settings.host)?;
        let admin = &self.settings.admin_email;
        let message = EmailMessage::new(
            admin.clone(),
            admin.clone(),
            EmailSubject::try_from(SUMMARY_EMAIL_SUBJECT)?,
            EmailHtmlContent::try_from(html)?,
        );

        self.mailer.send(&message).await?;
        Ok(())
    }
}

#[async_trait]
impl<A, U, R, M> SummaryService for SummaryReporter<A, U, R, M>
where
    A: ActivityRepository,
    U: UserService,
    R: SummaryRenderer,
    M: Mailer,
{
    #[tracing::instrument(
        name = "Build activity summary",
        skip(self),
        fields(quantity = tracing::field::Empty, total = tracing::field::Empty)
    )]
    async fn build_summary(&self, window: ReportWindow) -> Result<SummaryReport, SummaryError> {
        let (total, activities, new_users) = futures::try_join!(
            self.get_total_activities(),
            self.get_activities(window),
            self.get_new_users(window),
        )?;

        let summary =
            SummaryReport::build(window.from(), window.to(), &activities, new_users, total);
        tracing::Span::current()
            .record("quantity", summary.quantity)
            .record("total", summary.total);

        Ok(summary)
    }

    #[tracing::instrument(name = "Send summary", skip(self))]
    async fn send_summary(&self, window: ReportWindow) -> Result<SummaryReport, SummaryError> {
        let summary = self.build_summary(window).await?;
        self.send_email(&summary).await?;
        tracing::info!(
            quantity = summary.quantity,
            new_users = summary.new_users.len(),
            "Summary sent"
        );
        Ok(summary)
    }
}
