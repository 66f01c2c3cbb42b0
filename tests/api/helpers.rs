use activity_summary::configuration::{get_configuration, DatabaseSettings, Settings};
use activity_summary::domain::activity::models::Activity;
use activity_summary::domain::activity::ports::{ActivityRepository, ActivityRepositoryError};
use activity_summary::domain::summary::service::{ReporterSettings, SummaryReporter};
use activity_summary::domain::user::errors::UserError;
use activity_summary::domain::user::models::credentials::StoredCredentials;
use activity_summary::domain::user::models::user::User;
use activity_summary::domain::user::ports::UserRepository;
use activity_summary::domain::user::service::UserDirectory;
use activity_summary::inbound::http::Application;
use activity_summary::outbound::db::postgres_db::PostgresDb;
use activity_summary::outbound::notifier::email_client::EmailClient;
use activity_summary::outbound::renderer::HtmlTemplateRenderer;
use activity_summary::outbound::telemetry::init_logger;
use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHasher, Version};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use wiremock::MockServer;

#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<Vec<(User, String)>>,
    activities: Mutex<Vec<Activity>>,
}

impl InMemoryStore {
    pub fn insert_user(&self, user: User, password_hash: String) {
        self.users.lock().unwrap().push((user, password_hash));
    }

    pub fn insert_activity(&self, activity: Activity) {
        self.activities.lock().unwrap().push(activity);
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
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
            .map(|(u, hash)| StoredCredentials::new(u.clone(), hash.clone())))
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

#[async_trait]
impl ActivityRepository for InMemoryStore {
    async fn count(&self) -> Result<u64, ActivityRepositoryError> {
        Ok(self.activities.lock().unwrap().len() as u64)
    }

    async fn find_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Activity>, ActivityRepositoryError> {
        Ok(self
            .activities
            .lock()
            .unwrap()
            .iter()
            .filter(|a| from <= a.created_at && a.created_at < to)
            .cloned()
            .collect())
    }
}

/// Where a test seeds its records: the in-memory store or a throwaway
/// Postgres database.
pub enum TestStore {
    InMemory(Arc<InMemoryStore>),
    Postgres(PgPool),
}

impl TestStore {
    pub async fn insert_user(&self, user: &User, password_hash: &str) {
        match self {
            TestStore::InMemory(store) => store.insert_user(user.clone(), password_hash.into()),
            TestStore::Postgres(pool) => {
                sqlx::query(
                    r#"INSERT INTO users (id, username, email, password_hash, created_at)
                    VALUES ($1, $2, $3, $4, $5)"#,
                )
                .bind(user.id)
                .bind(&user.username)
                .bind(&user.email)
                .bind(password_hash)
                .bind(user.created_at)
                .execute(pool)
                .await
                .expect("Failed to store test user.");
            }
        }
    }

    pub async fn insert_activity(&self, activity: &Activity) {
        match self {
            TestStore::InMemory(store) => store.insert_activity(activity.clone()),
            TestStore::Postgres(pool) => {
                sqlx::query(
                    r#"INSERT INTO activities (id, user_id, category, created_at)
                    VALUES ($1, $2, $3, $4)"#,
                )
                .bind(activity.id)
                .bind(activity.user_id)
                .bind(&activity.category)
                .bind(activity.created_at)
                .execute(pool)
                .await
                .expect("Failed to store test activity.");
            }
        }
    }
}

pub struct TestUser {
    pub user: User,
    pub username: String,
    pub password: String,
}

impl TestUser {
    pub fn generate() -> Self {
        let username = Uuid::new_v4().to_string();
        Self {
            user: User::new(username.clone(), Utc::now()),
            username,
            password: Uuid::new_v4().to_string(),
        }
    }

    async fn store(&self, store: &TestStore) {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let password_hash = Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            Params::new(15000, 2, 1, None).unwrap(),
        )
        .hash_password(self.password.as_bytes(), &salt)
        .unwrap()
        .to_string();
        store.insert_user(&self.user, &password_hash).await;
    }
}

pub struct TestApp {
    pub address: String,
    pub email_server: MockServer,
    pub store: TestStore,
    pub test_user: TestUser,
    pub admin_email: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn get_health_check(&self, authorization: Option<&str>) -> reqwest::Response {
        let mut request = self
            .api_client
            .get(&format!("{}/health_check", &self.address));
        if let Some(authorization) = authorization {
            request = request.header("Authorization", authorization);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn get_me(&self, username: &str, password: &str) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/me", &self.address))
            .basic_auth(username, Some(password))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_me_anonymously(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/me", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_summary(&self) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/admin/summary", &self.address))
            .basic_auth(&self.test_user.username, Some(&self.test_user.password))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_summary_for(&self, day: NaiveDate) -> reqwest::Response {
        self.post_summary_with_query(&format!("day={}", day.format("%Y-%m-%d")))
            .await
    }

    pub async fn post_summary_with_query(&self, query: &str) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/admin/summary?{}", &self.address, query))
            .basic_auth(&self.test_user.username, Some(&self.test_user.password))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_summary_anonymously(&self) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/admin/summary", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_email_request_body(&self) -> serde_json::Value {
        let request = self
            .email_server
            .received_requests()
            .await
            .unwrap()
            .pop()
            .unwrap();
        serde_json::from_slice(&request.body).unwrap()
    }
}

static TRACING: Lazy<()> = Lazy::new(|| {
    let c = get_configuration().expect("Failed to read configuration");
    let default_filter_level = c.general.log_level;
    let subscriber_name = "test";
    if std::env::var("TEST_LOG").is_ok() {
        init_logger(subscriber_name, &default_filter_level, std::io::stdout);
    } else {
        init_logger(subscriber_name, &default_filter_level, std::io::sink);
    }
});

async fn test_configuration() -> (Settings, MockServer) {
    Lazy::force(&TRACING);
    let email_server = MockServer::start().await;
    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration");
        c.database.database_name = Uuid::new_v4().to_string();
        c.application.port = 0;
        c.email_client.base_url = email_server.uri();
        c
    };
    (configuration, email_server)
}

/// Spawns the app over an in-memory store.
pub async fn spawn_app() -> TestApp {
    let (configuration, email_server) = test_configuration().await;
    let store = Arc::new(InMemoryStore::default());
    launch(
        Arc::clone(&store),
        TestStore::InMemory(store),
        configuration,
        email_server,
    )
    .await
}

/// Spawns the app over a freshly migrated Postgres database.
pub async fn spawn_app_with_postgres() -> TestApp {
    let (configuration, email_server) = test_configuration().await;
    let pool = configure_database(&configuration.database).await;
    let repo = Arc::new(PostgresDb::new(&configuration.database));
    launch(repo, TestStore::Postgres(pool), configuration, email_server).await
}

async fn launch<R>(
    repo: Arc<R>,
    store: TestStore,
    configuration: Settings,
    email_server: MockServer,
) -> TestApp
where
    R: UserRepository + ActivityRepository,
{
    let test_user = TestUser::generate();
    test_user.store(&store).await;

    let report = &configuration.report;
    let email_client = Arc::new(
        EmailClient::new(configuration.email_client.clone()).expect("Failed to build email client"),
    );
    let renderer = Arc::new(
        HtmlTemplateRenderer::load(&report.templates_dir()).expect("Failed to load template"),
    );
    let user_service = UserDirectory::new(Arc::clone(&repo));
    let summary_service = SummaryReporter::new(
        repo,
        Arc::new(user_service.clone()),
        renderer,
        email_client,
        ReporterSettings::new(report.admin_email().unwrap(), report.host())
            .with_concurrency(report.concurrency),
    );

    let application = Application::build(
        user_service,
        summary_service,
        configuration.application.clone(),
    )
    .await
    .expect("Failed to build application");
    let application_port = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address: format!("http://127.0.0.1:{}", application_port),
        email_server,
        store,
        test_user,
        admin_email: configuration.report.email.clone(),
        api_client: reqwest::Client::new(),
    }
}

pub async fn configure_database(config: &DatabaseSettings) -> PgPool {
    let mut connection = PgConnection::connect_with(&config.without_db())
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.database_name).as_str())
        .await
        .expect("Failed to create database");

    let connection_pool = PgPool::connect_with(config.with_db())
        .await
        .expect("Failed to connect to Postgres");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}
