use crate::domain::models::{
    auth::RefreshTokenRecord,
    client::{Client, ClientWithReportCount},
    integration::Integration,
    job::Job,
    report::{Report, ReportStats},
    team::{MemberProfile, Team, TeamMember},
    template::Template,
    user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts the user, their team and the owning membership in one transaction.
    async fn create_with_team(&self, user: &User, team: &Team, owner: &TeamMember) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn update(&self, user: &User) -> Result<User, AppError>;
}

#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Team>, AppError>;
    async fn update(&self, team: &Team) -> Result<Team, AppError>;
    /// Membership of `user_id` in `team_id`, or in the team they joined first when no team is given.
    async fn find_membership(&self, user_id: &str, team_id: Option<&str>) -> Result<Option<TeamMember>, AppError>;
    async fn list_members(&self, team_id: &str) -> Result<Vec<MemberProfile>, AppError>;
    async fn add_member(&self, member: &TeamMember) -> Result<TeamMember, AppError>;
    async fn update_member_role(&self, team_id: &str, user_id: &str, role: &str) -> Result<(), AppError>;
    async fn remove_member(&self, team_id: &str, user_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn create(&self, client: &Client) -> Result<Client, AppError>;
    async fn find_by_id(&self, team_id: &str, id: &str) -> Result<Option<Client>, AppError>;
    /// Newest first, each row carrying its report tally.
    async fn list_by_team(&self, team_id: &str) -> Result<Vec<ClientWithReportCount>, AppError>;
    async fn count_by_team(&self, team_id: &str) -> Result<i64, AppError>;
    async fn update(&self, client: &Client) -> Result<Client, AppError>;
    async fn delete(&self, team_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait IntegrationRepository: Send + Sync {
    /// One connection per (client, provider); reconnecting replaces account and status.
    async fn upsert(&self, integration: &Integration) -> Result<Integration, AppError>;
    async fn find_by_id(&self, client_id: &str, id: &str) -> Result<Option<Integration>, AppError>;
    async fn list_by_client(&self, client_id: &str) -> Result<Vec<Integration>, AppError>;
    async fn list_by_team(&self, team_id: &str) -> Result<Vec<Integration>, AppError>;
    async fn delete(&self, client_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn create(&self, template: &Template) -> Result<Template, AppError>;
    /// Defaults plus the team's own templates.
    async fn find_visible(&self, team_id: &str, id: &str) -> Result<Option<Template>, AppError>;
    async fn list_visible(&self, team_id: &str) -> Result<Vec<Template>, AppError>;
    async fn update(&self, template: &Template) -> Result<Template, AppError>;
    async fn delete(&self, team_id: &str, id: &str) -> Result<(), AppError>;
    async fn increment_usage(&self, id: &str) -> Result<(), AppError>;
}

#[derive(Debug, Default, Clone)]
pub struct ReportFilter {
    pub status: Option<String>,
    pub client_id: Option<String>,
    pub limit: Option<i64>,
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn create(&self, report: &Report) -> Result<Report, AppError>;
    async fn find_by_id(&self, team_id: &str, id: &str) -> Result<Option<Report>, AppError>;
    async fn list_by_team(&self, team_id: &str, filter: &ReportFilter) -> Result<Vec<Report>, AppError>;
    async fn update(&self, report: &Report) -> Result<Report, AppError>;
    async fn delete(&self, team_id: &str, id: &str) -> Result<(), AppError>;
    async fn stats(&self, team_id: &str, month_start: DateTime<Utc>) -> Result<ReportStats, AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<(), AppError>;
    async fn delete_refresh_family(&self, family_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &Job) -> Result<Job, AppError>;
    /// Atomically claims up to `limit` due jobs, flipping them to PROCESSING.
    async fn find_pending(&self, limit: i32) -> Result<Vec<Job>, AppError>;
    async fn list_for_report(&self, report_id: &str) -> Result<Vec<Job>, AppError>;
    async fn update_status(&self, id: &str, status: &str, error_message: Option<String>) -> Result<(), AppError>;
    async fn cancel_for_report(&self, report_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str, attachment_name: Option<&str>, attachment_data: Option<&[u8]>) -> Result<(), AppError>;
}
