use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::integration::Integration;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Client {
    pub id: String,
    pub team_id: String,
    pub name: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    pub fn new(team_id: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            team_id,
            name,
            email: None,
            website: None,
            industry: None,
            description: None,
            logo_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, FromRow, Clone)]
pub struct ClientWithReportCount {
    #[sqlx(flatten)]
    pub client: Client,
    pub report_count: i64,
}

#[derive(Debug, Serialize)]
pub struct ReportCount {
    pub reports: i64,
}

/// Client as listed on the dashboard: its integrations plus a report tally.
#[derive(Debug, Serialize)]
pub struct ClientOverview {
    #[serde(flatten)]
    pub client: Client,
    pub integrations: Vec<Integration>,
    #[serde(rename = "_count")]
    pub count: ReportCount,
}
