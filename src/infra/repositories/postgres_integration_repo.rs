use crate::domain::{models::integration::Integration, ports::IntegrationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresIntegrationRepo { pool: PgPool }
impl PostgresIntegrationRepo { pub fn new(pool: PgPool) -> Self { Self { pool } } }

#[async_trait]
impl IntegrationRepository for PostgresIntegrationRepo {
    async fn upsert(&self, integration: &Integration) -> Result<Integration, AppError> {
        sqlx::query_as::<_, Integration>(
            r#"
            INSERT INTO integrations (id, client_id, provider, account_id, status, last_sync_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (client_id, provider) DO UPDATE SET
                account_id = excluded.account_id,
                status = excluded.status,
                last_sync_at = excluded.last_sync_at
            RETURNING *
            "#,
        )
            .bind(&integration.id)
            .bind(&integration.client_id)
            .bind(&integration.provider)
            .bind(&integration.account_id)
            .bind(&integration.status)
            .bind(integration.last_sync_at)
            .bind(integration.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, client_id: &str, id: &str) -> Result<Option<Integration>, AppError> {
        sqlx::query_as::<_, Integration>("SELECT * FROM integrations WHERE client_id = $1 AND id = $2")
            .bind(client_id)
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_client(&self, client_id: &str) -> Result<Vec<Integration>, AppError> {
        sqlx::query_as::<_, Integration>("SELECT * FROM integrations WHERE client_id = $1 ORDER BY created_at ASC")
            .bind(client_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_team(&self, team_id: &str) -> Result<Vec<Integration>, AppError> {
        sqlx::query_as::<_, Integration>(
            "SELECT i.* FROM integrations i JOIN clients c ON c.id = i.client_id WHERE c.team_id = $1 ORDER BY i.created_at ASC"
        )
            .bind(team_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, client_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM integrations WHERE client_id = $1 AND id = $2")
            .bind(client_id)
            .bind(id)
            .execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Integration not found".into()));
        }
        Ok(())
    }
}
