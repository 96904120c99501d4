use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::{team::TeamRole, user::User};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::Span;

pub const TEAM_HEADER: &str = "X-Team-Id";

/// The signed-in user together with the team the request acts on.
///
/// `X-Team-Id` picks a team explicitly; otherwise the first team the user joined is used.
pub struct TeamContext {
    pub user: User,
    pub team_id: String,
    pub role: TeamRole,
}

impl TeamContext {
    pub fn require_manager(&self) -> Result<(), AppError> {
        if self.role.can_manage() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Only team owners and admins can do this".into()))
        }
    }

    pub fn require_owner(&self) -> Result<(), AppError> {
        if self.role == TeamRole::Owner {
            Ok(())
        } else {
            Err(AppError::Forbidden("Only the team owner can do this".into()))
        }
    }
}

impl<S> FromRequestParts<S> for TeamContext
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let requested = parts.headers.get(TEAM_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        let membership = app_state.team_repo.find_membership(&user.id, requested).await?
            .ok_or_else(|| AppError::NotFound("No team found".into()))?;

        Span::current().record("team_id", membership.team_id.as_str());

        Ok(TeamContext {
            role: membership.role(),
            team_id: membership.team_id,
            user,
        })
    }
}
