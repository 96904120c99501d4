use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const CATEGORIES: &[&str] = &["SEO", "ADS", "SOCIAL", "CUSTOM"];

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Template {
    pub id: String,
    pub team_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub is_default: bool,
    pub usage_count: i32,
    pub created_at: DateTime<Utc>,
}

impl Template {
    /// Templates created through the API always belong to a team and are never defaults.
    pub fn custom(team_id: String, name: String, description: Option<String>, category: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            team_id: Some(team_id),
            name,
            description,
            category,
            is_default: false,
            usage_count: 0,
            created_at: Utc::now(),
        }
    }

    pub fn is_editable_by(&self, team_id: &str) -> bool {
        !self.is_default && self.team_id.as_deref() == Some(team_id)
    }
}
