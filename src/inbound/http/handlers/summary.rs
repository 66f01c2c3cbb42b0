use crate::{
    domain::{
        summary::{models::ReportWindow, ports::SummaryService},
        user::models::user::CurrentUser,
    },
    inbound::http::{errors::AppError, state::SharedSummaryState},
};
use actix_web::{web, HttpResponse};
use chrono::NaiveDate;

#[derive(serde::Deserialize, Debug)]
pub struct SummaryParameters {
    /// UTC day to report, `YYYY-MM-DD`. Defaults to today.
    day: Option<NaiveDate>,
}

#[tracing::instrument(
    name = "Trigger summary",
    skip(current_user, state),
    fields(username = tracing::field::Empty)
)]
pub async fn trigger_summary<SS: SummaryService>(
    current_user: Option<web::ReqData<CurrentUser>>,
    parameters: web::Query<SummaryParameters>,
    state: web::Data<SharedSummaryState<SS>>,
) -> Result<HttpResponse, AppError> {
    let current_user = current_user
        .ok_or_else(|| AppError::AuthError("No user attached to the request".to_string()))?
        .into_inner();
    tracing::Span::current().record("username", tracing::field::display(&current_user.username));

    let summary_service = state.summary_service();
    let summary = match parameters.into_inner().day {
        Some(day) => summary_service.send_summary(ReportWindow::for_day(day)).await?,
        None => summary_service.send_today_summary().await?,
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "from": summary.from,
        "to": summary.to,
        "quantity": summary.quantity,
        "total": summary.total,
        "new_users": summary.new_users.len(),
    })))
}
