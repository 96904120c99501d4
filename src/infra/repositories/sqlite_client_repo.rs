use crate::domain::{models::client::{Client, ClientWithReportCount}, ports::ClientRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::error;

pub struct SqliteClientRepo {
    pool: SqlitePool,
}

impl SqliteClientRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for SqliteClientRepo {
    async fn create(&self, client: &Client) -> Result<Client, AppError> {
        sqlx::query_as::<_, Client>(
            "INSERT INTO clients (id, team_id, name, email, website, industry, description, logo_url, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
            .bind(&client.id)
            .bind(&client.team_id)
            .bind(&client.name)
            .bind(&client.email)
            .bind(&client.website)
            .bind(&client.industry)
            .bind(&client.description)
            .bind(&client.logo_url)
            .bind(client.created_at)
            .bind(client.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, team_id: &str, id: &str) -> Result<Option<Client>, AppError> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE team_id = ? AND id = ?")
            .bind(team_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_team(&self, team_id: &str) -> Result<Vec<ClientWithReportCount>, AppError> {
        sqlx::query_as::<_, ClientWithReportCount>(
            r#"
            SELECT c.*, (SELECT COUNT(*) FROM reports r WHERE r.client_id = c.id) AS report_count
            FROM clients c
            WHERE c.team_id = ?
            ORDER BY c.created_at DESC
            "#,
        )
            .bind(team_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count_by_team(&self, team_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clients WHERE team_id = ?")
            .bind(team_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, client: &Client) -> Result<Client, AppError> {
        sqlx::query_as::<_, Client>(
            "UPDATE clients SET name = ?, email = ?, website = ?, industry = ?, description = ?, logo_url = ?, updated_at = ? WHERE team_id = ? AND id = ? RETURNING *",
        )
            .bind(&client.name)
            .bind(&client.email)
            .bind(&client.website)
            .bind(&client.industry)
            .bind(&client.description)
            .bind(&client.logo_url)
            .bind(client.updated_at)
            .bind(&client.team_id)
            .bind(&client.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, team_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM clients WHERE team_id = ? AND id = ?")
            .bind(team_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("SQLite client deletion failed: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Client not found".into()));
        }
        Ok(())
    }
}
