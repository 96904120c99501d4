use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use std::fmt;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportStatus {
    Draft,
    Generating,
    Completed,
    Sent,
    Failed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Draft => "DRAFT",
            ReportStatus::Generating => "GENERATING",
            ReportStatus::Completed => "COMPLETED",
            ReportStatus::Sent => "SENT",
            ReportStatus::Failed => "FAILED",
        }
    }

    /// Accepts both the stored form and the lower-case form used in query strings.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "DRAFT" => Some(ReportStatus::Draft),
            "GENERATING" => Some(ReportStatus::Generating),
            "COMPLETED" => Some(ReportStatus::Completed),
            "SENT" => Some(ReportStatus::Sent),
            "FAILED" => Some(ReportStatus::Failed),
            _ => None,
        }
    }

    pub fn can_generate(&self) -> bool {
        matches!(self, ReportStatus::Draft | ReportStatus::Completed | ReportStatus::Failed)
    }

    pub fn can_send(&self) -> bool {
        matches!(self, ReportStatus::Completed)
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Report {
    pub id: String,
    pub team_id: String,
    pub client_id: String,
    pub template_id: Option<String>,
    pub name: String,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub status: String,
    pub pdf_url: Option<String>,
    #[serde(skip_serializing)]
    pub document_html: Option<String>,
    pub error_message: Option<String>,
    pub created_by: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Report {
    pub fn draft(
        team_id: String,
        client_id: String,
        template_id: String,
        name: String,
        date_from: NaiveDate,
        date_to: NaiveDate,
        created_by: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            team_id,
            client_id,
            template_id: Some(template_id),
            name,
            date_from,
            date_to,
            status: ReportStatus::Draft.as_str().to_string(),
            pdf_url: None,
            document_html: None,
            error_message: None,
            created_by: Some(created_by),
            sent_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn status(&self) -> Result<ReportStatus, AppError> {
        ReportStatus::parse(&self.status)
            .ok_or_else(|| AppError::InternalWithMsg(format!("Unknown report status {}", self.status)))
    }

    pub fn begin_generation(&mut self) -> Result<(), AppError> {
        let current = self.status()?;
        if !current.can_generate() {
            return Err(AppError::Validation(format!("Cannot generate a report that is {}", current.as_str().to_lowercase())));
        }
        self.transition(ReportStatus::Generating);
        self.error_message = None;
        Ok(())
    }

    pub fn complete_generation(&mut self, document_html: String, document_url: String) {
        self.transition(ReportStatus::Completed);
        self.document_html = Some(document_html);
        self.pdf_url = Some(document_url);
        self.error_message = None;
    }

    pub fn fail(&mut self, reason: String) {
        self.transition(ReportStatus::Failed);
        self.error_message = Some(reason);
    }

    pub fn ensure_sendable(&self) -> Result<(), AppError> {
        let current = self.status()?;
        if !current.can_send() {
            return Err(AppError::Validation("Only completed reports can be sent".into()));
        }
        Ok(())
    }

    pub fn mark_sent(&mut self) {
        let now = Utc::now();
        self.transition(ReportStatus::Sent);
        self.sent_at = Some(now);
    }

    fn transition(&mut self, next: ReportStatus) {
        self.status = next.as_str().to_string();
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, FromRow, Serialize, Default)]
pub struct ReportStats {
    pub generated: i64,
    pub this_month: i64,
}
