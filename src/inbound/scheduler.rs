use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};

use crate::domain::summary::models::ReportWindow;
use crate::domain::summary::ports::SummaryService;
use crate::inbound::http::state::SharedSummaryState;

/// Sends the summary of the previous UTC day once a day at a fixed time.
///
/// Reporting only completed days means every instant lands in exactly one
/// scheduled report, whatever `send_at` is.
pub struct DailySummaryScheduler<SS: SummaryService> {
    state: SharedSummaryState<SS>,
    send_at: NaiveTime,
}

impl<SS: SummaryService> DailySummaryScheduler<SS> {
    pub fn new(state: SharedSummaryState<SS>, send_at: NaiveTime) -> Self {
        Self { state, send_at }
    }

    pub async fn run_until_stopped(self) {
        loop {
            let now = Utc::now();
            let fire_at = next_run(now, self.send_at);
            tracing::info!(%fire_at, "Next summary scheduled");
            tokio::time::sleep((fire_at - now).to_std().unwrap_or_default()).await;
            self.run_once(fire_at).await;
        }
    }

    /// Reports the day before `fired_at`. A failed run is logged and does
    /// not stop the schedule.
    pub async fn run_once(&self, fired_at: DateTime<Utc>) {
        let window = ReportWindow::day_before(fired_at);
        if let Err(error) = self.state.summary_service().send_summary(window).await {
            tracing::error!(
                error.cause_chain = ?error,
                error.message = %error,
                from = %window.from(),
                "Failed to send the daily summary"
            );
        }
    }
}

/// Next occurrence of `at`, strictly after `now`.
pub fn next_run(now: DateTime<Utc>, at: NaiveTime) -> DateTime<Utc> {
    let today = Utc.from_utc_datetime(&now.date_naive().and_time(at));
    if today > now {
        today
    } else {
        today + Duration::days(1)
    }
}
