use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TeamRole {
    Owner,
    Admin,
    Member,
}

impl TeamRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamRole::Owner => "OWNER",
            TeamRole::Admin => "ADMIN",
            TeamRole::Member => "MEMBER",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "OWNER" => Some(TeamRole::Owner),
            "ADMIN" => Some(TeamRole::Admin),
            "MEMBER" => Some(TeamRole::Member),
            _ => None,
        }
    }

    /// Owners and admins manage team settings and membership.
    pub fn can_manage(&self) -> bool {
        matches!(self, TeamRole::Owner | TeamRole::Admin)
    }
}

impl fmt::Display for TeamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub owner_id: String,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Team {
    /// The team every new account starts with: "<name>'s Team", slugged by the owner's id prefix.
    pub fn default_for(owner_id: &str, owner_name: &str) -> Self {
        let prefix: String = owner_id.chars().take(8).collect();
        Self {
            id: Uuid::new_v4().to_string(),
            name: format!("{}'s Team", owner_name),
            slug: format!("team-{}", prefix),
            owner_id: owner_id.to_string(),
            logo_url: None,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct TeamMember {
    pub id: String,
    pub team_id: String,
    pub user_id: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl TeamMember {
    pub fn new(team_id: String, user_id: String, role: TeamRole) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            team_id,
            user_id,
            role: role.as_str().to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn role(&self) -> TeamRole {
        TeamRole::parse(&self.role).unwrap_or(TeamRole::Member)
    }
}

/// Membership row joined with the user's public profile.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct MemberProfile {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_team_uses_owner_name_and_id_prefix() {
        let team = Team::default_for("0123456789abcdef", "Ada");
        assert_eq!(team.name, "Ada's Team");
        assert_eq!(team.slug, "team-01234567");
        assert_eq!(team.owner_id, "0123456789abcdef");
    }

    #[test]
    fn only_owner_and_admin_manage() {
        assert!(TeamRole::Owner.can_manage());
        assert!(TeamRole::Admin.can_manage());
        assert!(!TeamRole::Member.can_manage());
        assert_eq!(TeamRole::parse("ADMIN"), Some(TeamRole::Admin));
        assert_eq!(TeamRole::parse("admin"), None);
    }
}
