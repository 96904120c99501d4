use std::sync::Arc;
use crate::domain::ports::{
    AuthRepository, ClientRepository, EmailService, IntegrationRepository, JobRepository,
    ReportRepository, TeamRepository, TemplateRepository, UserRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub team_repo: Arc<dyn TeamRepository>,
    pub client_repo: Arc<dyn ClientRepository>,
    pub integration_repo: Arc<dyn IntegrationRepository>,
    pub template_repo: Arc<dyn TemplateRepository>,
    pub report_repo: Arc<dyn ReportRepository>,
    pub job_repo: Arc<dyn JobRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub auth_service: Arc<AuthService>,
    pub email_service: Arc<dyn EmailService>,
    pub templates: Arc<Tera>,
}
