use crate::configuration::ApplicationSettings;
use crate::domain::summary::ports::SummaryService;
use crate::domain::user::ports::UserService;
use crate::inbound::http::handlers::{health_check, me, trigger_summary};
use crate::inbound::http::middleware::attach_current_user;
use crate::inbound::http::state::{SharedSummaryState, SharedUserState};
use actix_web::dev::Server;
use actix_web::middleware::from_fn;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

mod auth;
mod errors;
mod handlers;
pub mod middleware;
pub mod state;

pub use errors::AppError;

pub struct Application<SS: SummaryService> {
    port: u16,
    server: Server,
    summary_state: SharedSummaryState<SS>,
}

fn run<US: UserService, SS: SummaryService>(
    listener: TcpListener,
    user_state: SharedUserState<US>,
    summary_state: SharedSummaryState<SS>,
) -> Result<Server, std::io::Error> {
    let user_state = web::Data::new(user_state);
    let summary_state = web::Data::new(summary_state);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(from_fn(attach_current_user::<US, _>))
            .wrap(TracingLogger::default())
            .app_data(user_state.clone())
            .app_data(summary_state.clone())
            .route("/health_check", web::get().to(health_check))
            .route("/me", web::get().to(me))
            .route("/admin/summary", web::post().to(trigger_summary::<SS>))
    })
    .listen(listener)?
    .run();

    Ok(server)
}

impl<SS: SummaryService> Application<SS> {
    pub async fn build<US: UserService>(
        user_service: US,
        summary_service: SS,
        configuration: ApplicationSettings,
    ) -> Result<Self, std::io::Error> {
        let address = format!("{}:{}", configuration.host, configuration.port);
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let user_state = SharedUserState::new(user_service);
        let summary_state = SharedSummaryState::new(summary_service);

        let server = run(listener, user_state, summary_state.clone())?;

        Ok(Self {
            port,
            server,
            summary_state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn summary_state(&self) -> SharedSummaryState<SS> {
        self.summary_state.clone()
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
