use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web, Error, HttpMessage,
};

use crate::domain::user::errors::UserError;
use crate::domain::user::models::user::CurrentUser;
use crate::domain::user::ports::UserService;
use crate::inbound::http::auth::basic_authentication;
use crate::inbound::http::state::SharedUserState;

/// Attaches the requesting user, when one can be resolved, as a `CurrentUser`
/// request extension.
///
/// Resolution failures never fail the request: it continues anonymously and
/// handlers that need a user must check for the extension themselves.
pub async fn attach_current_user<US, B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<B>, Error>
where
    US: UserService,
    B: MessageBody,
{
    if let Some(user) = resolve_user::<US>(&req).await {
        req.extensions_mut().insert(user);
    }
    next.call(req).await
}

async fn resolve_user<US: UserService>(req: &ServiceRequest) -> Option<CurrentUser> {
    let state = req.app_data::<web::Data<SharedUserState<US>>>()?.clone();

    let credentials = match basic_authentication(req.headers()) {
        Ok(credentials) => credentials,
        Err(error) => {
            tracing::debug!(error.cause_chain = ?error, "Proceeding without a user");
            return None;
        }
    };

    match state
        .user_service()
        .get_user_from_credentials(credentials)
        .await
    {
        Ok(user) => Some(CurrentUser::from(user)),
        Err(UserError::Unexpected(error)) => {
            tracing::warn!(
                error.cause_chain = ?error,
                "User lookup failed, proceeding without a user"
            );
            None
        }
        Err(error) => {
            tracing::debug!(error.cause_chain = ?error, "Proceeding without a user");
            None
        }
    }
}
