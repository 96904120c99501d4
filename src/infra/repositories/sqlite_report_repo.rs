use crate::domain::{models::report::{Report, ReportStats}, ports::{ReportFilter, ReportRepository}};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub struct SqliteReportRepo {
    pool: SqlitePool,
}

impl SqliteReportRepo {
    pub fn new(pool: SqlitePool) -> Self { Self { pool } }
}

#[async_trait]
impl ReportRepository for SqliteReportRepo {
    async fn create(&self, report: &Report) -> Result<Report, AppError> {
        sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (id, team_id, client_id, template_id, name, date_from, date_to, status, pdf_url,
                                 document_html, error_message, created_by, sent_at, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#
        )
            .bind(&report.id)
            .bind(&report.team_id)
            .bind(&report.client_id)
            .bind(&report.template_id)
            .bind(&report.name)
            .bind(report.date_from)
            .bind(report.date_to)
            .bind(&report.status)
            .bind(&report.pdf_url)
            .bind(&report.document_html)
            .bind(&report.error_message)
            .bind(&report.created_by)
            .bind(report.sent_at)
            .bind(report.created_at)
            .bind(report.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, team_id: &str, id: &str) -> Result<Option<Report>, AppError> {
        sqlx::query_as::<_, Report>("SELECT * FROM reports WHERE team_id = ? AND id = ?")
            .bind(team_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_team(&self, team_id: &str, filter: &ReportFilter) -> Result<Vec<Report>, AppError> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM reports WHERE team_id = ");
        qb.push_bind(team_id);
        if let Some(status) = &filter.status {
            qb.push(" AND status = ").push_bind(status);
        }
        if let Some(client_id) = &filter.client_id {
            qb.push(" AND client_id = ").push_bind(client_id);
        }
        qb.push(" ORDER BY created_at DESC");
        if let Some(limit) = filter.limit {
            qb.push(" LIMIT ").push_bind(limit);
        }

        qb.build_query_as::<Report>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, report: &Report) -> Result<Report, AppError> {
        sqlx::query_as::<_, Report>(
            r#"
            UPDATE reports
            SET status = ?, pdf_url = ?, document_html = ?, error_message = ?, sent_at = ?, updated_at = ?
            WHERE team_id = ? AND id = ?
            RETURNING *
            "#
        )
            .bind(&report.status)
            .bind(&report.pdf_url)
            .bind(&report.document_html)
            .bind(&report.error_message)
            .bind(report.sent_at)
            .bind(report.updated_at)
            .bind(&report.team_id)
            .bind(&report.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, team_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM reports WHERE team_id = ? AND id = ?")
            .bind(team_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Report not found".into()));
        }
        Ok(())
    }

    async fn stats(&self, team_id: &str, month_start: DateTime<Utc>) -> Result<ReportStats, AppError> {
        sqlx::query_as::<_, ReportStats>(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN status IN ('COMPLETED', 'SENT') THEN 1 ELSE 0 END), 0) AS generated,
                COALESCE(SUM(CASE WHEN created_at >= ? THEN 1 ELSE 0 END), 0) AS this_month
            FROM reports
            WHERE team_id = ?
            "#
        )
            .bind(month_start)
            .bind(team_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
