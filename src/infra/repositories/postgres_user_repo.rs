use crate::domain::{models::{team::{Team, TeamMember}, user::{User, DUPLICATE_EMAIL}}, ports::UserRepository};
use crate::error::{is_unique_violation, AppError};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepo {
    async fn create_with_team(&self, user: &User, team: &Team, owner: &TeamMember) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, password_hash, image, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
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

        sqlx::query("INSERT INTO teams (id, name, slug, owner_id, logo_url, created_at) VALUES ($1, $2, $3, $4, $5, $6)")
            .bind(&team.id)
            .bind(&team.name)
            .bind(&team.slug)
            .bind(&team.owner_id)
            .bind(&team.logo_url)
            .bind(team.created_at)
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO team_members (id, team_id, user_id, role, created_at) VALUES ($1, $2, $3, $4, $5)")
            .bind(&owner.id)
            .bind(&owner.team_id)
            .bind(&owner.user_id)
            .bind(&owner.role)
            .bind(owner.created_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await.map_err(|e| {
            error!("Postgres registration commit failed: {:?}", e);
            AppError::Database(e)
        })?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET name = $1, email = $2, image = $3, updated_at = $4 WHERE id = $5 RETURNING *",
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
