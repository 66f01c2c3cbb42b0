use crate::domain::summary::ports::SummaryService;
use crate::domain::user::ports::UserService;
use std::sync::Arc;

#[derive(Debug)]
pub struct UserState<US: UserService> {
    user_service: US,
}

#[derive(Debug)]
pub struct SharedUserState<US: UserService>(Arc<UserState<US>>);

impl<US: UserService> SharedUserState<US> {
    pub fn new(user_service: US) -> Self {
        Self(Arc::new(UserState { user_service }))
    }

    pub fn user_service(&self) -> &US {
        &self.0.user_service
    }
}

impl<US: UserService> Clone for SharedUserState<US> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

#[derive(Debug)]
pub struct SummaryState<SS: SummaryService> {
    summary_service: SS,
}

#[derive(Debug)]
pub struct SharedSummaryState<SS: SummaryService>(Arc<SummaryState<SS>>);

impl<SS: SummaryService> SharedSummaryState<SS> {
    pub fn new(summary_service: SS) -> Self {
        Self(Arc::new(SummaryState { summary_service }))
    }

    pub fn summary_service(&self) -> &SS {
        &self.0.summary_service
    }
}

impl<SS: SummaryService> Clone for SharedSummaryState<SS> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}
