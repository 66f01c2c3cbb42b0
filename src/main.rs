use activity_summary::configuration::get_configuration;
use activity_summary::domain::summary::service::{ReporterSettings, SummaryReporter};
use activity_summary::domain::user::service::UserDirectory;
use activity_summary::inbound::http::Application;
use activity_summary::inbound::scheduler::DailySummaryScheduler;
use activity_summary::outbound::db::postgres_db::PostgresDb;
use activity_summary::outbound::notifier::email_client::EmailClient;
use activity_summary::outbound::renderer::HtmlTemplateRenderer;
use activity_summary::outbound::telemetry::init_logger;
use anyhow::Context;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration().context("Failed to read configuration")?;
    init_logger("activity_summary", &configuration.log_level(), std::io::stdout);

    let report = &configuration.report;
    let admin_email = report.admin_email().map_err(anyhow::Error::msg)?;
    let send_at = report.send_at().map_err(anyhow::Error::msg)?;
    let renderer = Arc::new(HtmlTemplateRenderer::load(&report.templates_dir())?);
    let email_client = Arc::new(EmailClient::new(configuration.email_client.clone())?);
    let repo = Arc::new(PostgresDb::new(&configuration.database));

    let user_service = UserDirectory::new(Arc::clone(&repo));
    let summary_service = SummaryReporter::new(
        Arc::clone(&repo),
        Arc::new(user_service.clone()),
        renderer,
        email_client,
        ReporterSettings::new(admin_email, report.host()).with_concurrency(report.concurrency),
    );

    let application = Application::build(
        user_service,
        summary_service,
        configuration.application.clone(),
    )
    .await?;
    let scheduler = DailySummaryScheduler::new(application.summary_state(), send_at);

    tokio::select! {
        outcome = application.run_until_stopped() => outcome?,
        _ = scheduler.run_until_stopped() => {}
    }
    Ok(())
}
