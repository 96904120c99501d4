use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgConnectOptions, PgPoolOptions}, sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}};
use sqlx::{ConnectOptions, PgPool, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::ports::EmailService;
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::report_document::load_templates;
use crate::infra::email::http_email_service::HttpEmailService;
use crate::infra::repositories::{
    postgres_auth_repo::PostgresAuthRepo, postgres_client_repo::PostgresClientRepo,
    postgres_integration_repo::PostgresIntegrationRepo, postgres_job_repo::PostgresJobRepo,
    postgres_report_repo::PostgresReportRepo, postgres_team_repo::PostgresTeamRepo,
    postgres_template_repo::PostgresTemplateRepo, postgres_user_repo::PostgresUserRepo,
    sqlite_auth_repo::SqliteAuthRepo, sqlite_client_repo::SqliteClientRepo,
    sqlite_integration_repo::SqliteIntegrationRepo, sqlite_job_repo::SqliteJobRepo,
    sqlite_report_repo::SqliteReportRepo, sqlite_team_repo::SqliteTeamRepo,
    sqlite_template_repo::SqliteTemplateRepo, sqlite_user_repo::SqliteUserRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    let email_service = Arc::new(HttpEmailService::new(
        config.mail_service_url.clone(),
        config.mail_service_token.clone(),
        "ClientReporter",
    ));
    bootstrap_state_with_email(config, email_service).await
}

/// Builds the state over whichever database `DATABASE_URL` names, with the given mail transport.
pub async fn bootstrap_state_with_email(config: &Config, email_service: Arc<dyn EmailService>) -> AppState {
    let database_url = &config.database_url;
    let templates = Arc::new(load_templates().expect("Failed to load report templates"));

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let auth_repo = Arc::new(PostgresAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

        AppState {
            config: config.clone(),
            user_repo: Arc::new(PostgresUserRepo::new(pool.clone())),
            team_repo: Arc::new(PostgresTeamRepo::new(pool.clone())),
            client_repo: Arc::new(PostgresClientRepo::new(pool.clone())),
            integration_repo: Arc::new(PostgresIntegrationRepo::new(pool.clone())),
            template_repo: Arc::new(PostgresTemplateRepo::new(pool.clone())),
            report_repo: Arc::new(PostgresReportRepo::new(pool.clone())),
            job_repo: Arc::new(PostgresJobRepo::new(pool.clone())),
            auth_repo,
            auth_service,
            email_service,
            templates,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

        AppState {
            config: config.clone(),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            team_repo: Arc::new(SqliteTeamRepo::new(pool.clone())),
            client_repo: Arc::new(SqliteClientRepo::new(pool.clone())),
            integration_repo: Arc::new(SqliteIntegrationRepo::new(pool.clone())),
            template_repo: Arc::new(SqliteTemplateRepo::new(pool.clone())),
            report_repo: Arc::new(SqliteReportRepo::new(pool.clone())),
            job_repo: Arc::new(SqliteJobRepo::new(pool.clone())),
            auth_repo,
            auth_service,
            email_service,
            templates,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
