pub mod sqlite_user_repo;
pub mod sqlite_team_repo;
pub mod sqlite_client_repo;
pub mod sqlite_integration_repo;
pub mod sqlite_template_repo;
pub mod sqlite_report_repo;
pub mod sqlite_auth_repo;
pub mod sqlite_job_repo;

pub mod postgres_user_repo;
pub mod postgres_team_repo;
pub mod postgres_client_repo;
pub mod postgres_integration_repo;
pub mod postgres_template_repo;
pub mod postgres_report_repo;
pub mod postgres_auth_repo;
pub mod postgres_job_repo;
