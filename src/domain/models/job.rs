use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

pub const GENERATE_REPORT: &str = "GENERATE_REPORT";
pub const SEND_REPORT: &str = "SEND_REPORT";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JobPayload {
    pub report_id: String,
    pub team_id: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Job {
    pub id: String,
    pub job_type: String,
    pub payload: Json<JobPayload>,
    pub execute_at: DateTime<Utc>,
    pub status: String,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn new(job_type: &str, report_id: String, team_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            job_type: job_type.to_string(),
            payload: Json(JobPayload { report_id, team_id }),
            execute_at: now,
            status: "PENDING".to_string(),
            error_message: None,
            created_at: now,
        }
    }
}
