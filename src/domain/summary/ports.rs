use async_trait::async_trait;

use super::errors::SummaryError;
use super::models::{ReportWindow, SummaryReport};

/// Turns a report into the HTML body of the summary email.
pub trait SummaryRenderer: Send + Sync + 'static {
    fn render(&self, summary: &SummaryReport, host: &str) -> Result<String, SummaryError>;
}

#[async_trait]
pub trait SummaryService: Send + Sync + 'static {
    /// Aggregates the activity of `window` without sending anything.
    async fn build_summary(&self, window: ReportWindow) -> Result<SummaryReport, SummaryError>;

    /// Builds the report for `window` and emails it to the administrators.
    async fn send_summary(&self, window: ReportWindow) -> Result<SummaryReport, SummaryError>;

    async fn send_today_summary(&self) -> Result<SummaryReport, SummaryError> {
        self.send_summary(ReportWindow::today()).await
    }
}
