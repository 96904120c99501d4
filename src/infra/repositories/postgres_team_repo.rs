use crate::domain::{models::team::{MemberProfile, Team, TeamMember}, ports::TeamRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresTeamRepo {
    pool: PgPool,
}

impl PostgresTeamRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepo {
    async fn find_by_id(&self, id: &str) -> Result<Option<Team>, AppError> {
        sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, team: &Team) -> Result<Team, AppError> {
        sqlx::query_as::<_, Team>("UPDATE teams SET name = $1, logo_url = $2 WHERE id = $3 RETURNING *")
            .bind(&team.name)
            .bind(&team.logo_url)
            .bind(&team.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_membership(&self, user_id: &str, team_id: Option<&str>) -> Result<Option<TeamMember>, AppError> {
        let query = match team_id {
            Some(team_id) => sqlx::query_as::<_, TeamMember>(
                "SELECT * FROM team_members WHERE user_id = $1 AND team_id = $2",
            )
                .bind(user_id)
                .bind(team_id),
            None => sqlx::query_as::<_, TeamMember>(
                "SELECT * FROM team_members WHERE user_id = $1 ORDER BY created_at ASC LIMIT 1",
            )
                .bind(user_id),
        };

        query.fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_members(&self, team_id: &str) -> Result<Vec<MemberProfile>, AppError> {
        sqlx::query_as::<_, MemberProfile>(
            r#"
            SELECT u.id AS user_id, u.name, u.email, u.image, tm.role, tm.created_at AS joined_at
            FROM team_members tm
            JOIN users u ON u.id = tm.user_id
            WHERE tm.team_id = $1
            ORDER BY tm.created_at ASC
            "#,
        )
            .bind(team_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn add_member(&self, member: &TeamMember) -> Result<TeamMember, AppError> {
        sqlx::query_as::<_, TeamMember>(
            "INSERT INTO team_members (id, team_id, user_id, role, created_at) VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
            .bind(&member.id)
            .bind(&member.team_id)
            .bind(&member.user_id)
            .bind(&member.role)
            .bind(member.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update_member_role(&self, team_id: &str, user_id: &str, role: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE team_members SET role = $1 WHERE team_id = $2 AND user_id = $3")
            .bind(role)
            .bind(team_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Member not found".into()));
        }
        Ok(())
    }

    async fn remove_member(&self, team_id: &str, user_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM team_members WHERE team_id = $1 AND user_id = $2")
            .bind(team_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Member not found".into()));
        }
        Ok(())
    }
}
