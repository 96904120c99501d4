use serde::Serialize;

use crate::domain::models::{
    auth::UserProfile,
    client::Client,
    job::Job,
    report::Report,
    team::Team,
    template::Template,
    user::User,
};

#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub user: UserProfile,
    pub team: Team,
    pub role: String,
}

#[derive(Serialize)]
pub struct ReportDetail {
    #[serde(flatten)]
    pub report: Report,
    pub client: Client,
    pub template: Option<Template>,
    pub jobs: Vec<Job>,
}

#[derive(Serialize)]
pub struct DashboardStats {
    pub total_clients: i64,
    pub reports_generated: i64,
    pub active_integrations: usize,
    pub reports_this_month: i64,
    pub recent_reports: Vec<Report>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self { id: user.id, name: user.name, email: user.email, image: user.image }
    }
}
