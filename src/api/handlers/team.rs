use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::{AddMemberRequest, UpdateMemberRoleRequest, UpdateTeamRequest};
use crate::api::extractors::team::TeamContext;
use crate::api::extractors::json::ApiJson;
use crate::api::validation::{blank_to_none, FieldErrors};
use crate::domain::models::team::{TeamMember, TeamRole};
use crate::domain::models::user::normalize_email;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn get_team(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
) -> Result<impl IntoResponse, AppError> {
    let team = state.team_repo.find_by_id(&ctx.team_id).await?
        .ok_or_else(|| AppError::NotFound("No team found".into()))?;
    Ok(Json(team))
}

pub async fn update_team(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
    ApiJson(payload): ApiJson<UpdateTeamRequest>,
) -> Result<impl IntoResponse, AppError> {
    ctx.require_manager()?;

    let mut errors = FieldErrors::new();
    if let Some(name) = &payload.name {
        errors.min_len("name", name, 2, "Name must be at least 2 characters");
    }
    errors.optional_url("logo_url", payload.logo_url.as_deref()).finish()?;

    let mut team = state.team_repo.find_by_id(&ctx.team_id).await?
        .ok_or_else(|| AppError::NotFound("No team found".into()))?;

    if let Some(name) = payload.name {
        team.name = name.trim().to_string();
    }
    if payload.logo_url.is_some() {
        team.logo_url = blank_to_none(payload.logo_url);
    }

    let updated = state.team_repo.update(&team).await?;
    info!("Updated team: {}", updated.id);
    Ok(Json(updated))
}

pub async fn list_members(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
) -> Result<impl IntoResponse, AppError> {
    let members = state.team_repo.list_members(&ctx.team_id).await?;
    Ok(Json(members))
}

/// Adds an existing account to the team. Ownership is never granted this way.
pub async fn add_member(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
    ApiJson(payload): ApiJson<AddMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    ctx.require_manager()?;
    FieldErrors::new().email("email", &payload.email).finish()?;

    let role = parse_assignable_role(payload.role.as_deref().unwrap_or("MEMBER"))?;

    let user = state.user_repo.find_by_email(&normalize_email(&payload.email)).await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    if state.team_repo.find_membership(&user.id, Some(&ctx.team_id)).await?.is_some() {
        return Err(AppError::Conflict("User is already a member of this team".into()));
    }

    let member = state.team_repo.add_member(&TeamMember::new(ctx.team_id.clone(), user.id.clone(), role)).await?;
    info!(team_id = %ctx.team_id, user_id = %user.id, role = %role, "Added team member");

    Ok((StatusCode::CREATED, Json(member)))
}

pub async fn update_member_role(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
    Path(user_id): Path<String>,
    ApiJson(payload): ApiJson<UpdateMemberRoleRequest>,
) -> Result<impl IntoResponse, AppError> {
    ctx.require_owner()?;
    let role = parse_assignable_role(&payload.role)?;

    if user_id == ctx.user.id {
        return Err(AppError::Validation("The owner's role cannot be changed".into()));
    }

    state.team_repo.update_member_role(&ctx.team_id, &user_id, role.as_str()).await?;
    info!(team_id = %ctx.team_id, user_id = %user_id, role = %role, "Changed member role");

    Ok(Json(serde_json::json!({ "user_id": user_id, "role": role })))
}

pub async fn remove_member(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    ctx.require_manager()?;

    let member = state.team_repo.find_membership(&user_id, Some(&ctx.team_id)).await?
        .ok_or_else(|| AppError::NotFound("Member not found".into()))?;

    if member.role() == TeamRole::Owner {
        return Err(AppError::Forbidden("The team owner cannot be removed".into()));
    }

    state.team_repo.remove_member(&ctx.team_id, &user_id).await?;
    info!(team_id = %ctx.team_id, user_id = %user_id, "Removed team member");

    Ok(StatusCode::NO_CONTENT)
}

fn parse_assignable_role(value: &str) -> Result<TeamRole, AppError> {
    match TeamRole::parse(&value.trim().to_uppercase()) {
        Some(TeamRole::Owner) | None => Err(AppError::Validation("Role must be ADMIN or MEMBER".into())),
        Some(role) => Ok(role),
    }
}
