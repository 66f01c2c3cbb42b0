use crate::{domain::user::models::user::CurrentUser, inbound::http::errors::AppError};
use actix_web::{web, HttpResponse};

#[tracing::instrument(name = "Get current user", skip(current_user))]
pub async fn me(
    current_user: Option<web::ReqData<CurrentUser>>,
) -> Result<HttpResponse, AppError> {
    let current_user = current_user
        .ok_or_else(|| AppError::AuthError("No user attached to the request".to_string()))?
        .into_inner();

    Ok(HttpResponse::Ok().json(current_user))
}
