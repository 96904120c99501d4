use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct AddMemberRequest {
    pub email: String,
    pub role: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct UpdateMemberRoleRequest {
    pub role: String,
}

/// Body of both client create and client update; blank strings clear a field.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ClientRequest {
    pub name: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ConnectIntegrationRequest {
    pub provider: String,
    pub account_id: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct TemplateRequest {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
}

/// Final submission of the report wizard.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct CreateReportRequest {
    pub client_id: String,
    pub template_id: String,
    pub name: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

#[derive(Deserialize, Default)]
pub struct ReportQuery {
    pub status: Option<String>,
    pub client_id: Option<String>,
}
