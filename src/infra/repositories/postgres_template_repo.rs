use crate::domain::{models::template::Template, ports::TemplateRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresTemplateRepo {
    pool: PgPool,
}

impl PostgresTemplateRepo {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl TemplateRepository for PostgresTemplateRepo {
    async fn create(&self, template: &Template) -> Result<Template, AppError> {
        sqlx::query_as::<_, Template>(
            "INSERT INTO templates (id, team_id, name, description, category, is_default, usage_count, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *"
        )
            .bind(&template.id)
            .bind(&template.team_id)
            .bind(&template.name)
            .bind(&template.description)
            .bind(&template.category)
            .bind(template.is_default)
            .bind(template.usage_count)
            .bind(template.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_visible(&self, team_id: &str, id: &str) -> Result<Option<Template>, AppError> {
        sqlx::query_as::<_, Template>(
            "SELECT * FROM templates WHERE id = $1 AND (team_id IS NULL OR team_id = $2)"
        )
            .bind(id)
            .bind(team_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_visible(&self, team_id: &str) -> Result<Vec<Template>, AppError> {
        sqlx::query_as::<_, Template>(
            "SELECT * FROM templates WHERE team_id IS NULL OR team_id = $1 ORDER BY is_default DESC, created_at DESC, name ASC"
        )
            .bind(team_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, template: &Template) -> Result<Template, AppError> {
        sqlx::query_as::<_, Template>(
            "UPDATE templates SET name = $1, description = $2, category = $3 WHERE id = $4 AND team_id = $5 AND NOT is_default RETURNING *"
        )
            .bind(&template.name)
            .bind(&template.description)
            .bind(&template.category)
            .bind(&template.id)
            .bind(&template.team_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Template not found".into()))
    }

    async fn delete(&self, team_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM templates WHERE team_id = $1 AND id = $2 AND NOT is_default")
            .bind(team_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Template not found".into()));
        }
        Ok(())
    }

    async fn increment_usage(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE templates SET usage_count = usage_count + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
