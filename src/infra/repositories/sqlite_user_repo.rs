use crate::domain::{models::{team::{Team, TeamMember}, user::{User, DUPLICATE_EMAIL}}, ports::UserRepository};
use crate::error::{is_unique_violation, AppError};
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::error;

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepo {
    async fn create_with_team(&self, user: &User, team: &Team, owner: &TeamMember) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, password_hash, image, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
            .bind(&user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.image)
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                // Lost a race with a concurrent registration for the same address.
                if is_unique_violation(&e) {
                    AppError::Validation(DUPLICATE_EMAIL.into())
                } else {
                    AppError::Database(e)
                }
            })?;

        sqlx::query("INSERT INTO teams (id, name, slug, owner_id, logo_url, created_at) VALUES (?, ?, ?, ?, ?, ?)")
            .bind(&team.id)
            .bind(&team.name)
            .bind(&team.slug)
            .bind(&team.owner_id)
            .bind(&team.logo_url)
            .bind(team.created_at)
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO team_members (id, team_id, user_id, role, created_at) VALUES (?, ?, ?, ?, ?)")
            .bind(&owner.id)
            .bind(&owner.team_id)
            .bind(&owner.user_id)
            .bind(&owner.role)
            .bind(owner.created_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await.map_err(|e| {
            error!("SQLite registration commit failed: {:?}", e);
            AppError::Database(e)
        })?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET name = ?, email = ?, image = ?, updated_at = ? WHERE id = ? RETURNING *",
        )
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.image)
            .bind(user.updated_at)
            .bind(&user.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
