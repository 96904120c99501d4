use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::TemplateRequest;
use crate::api::extractors::team::TeamContext;
use crate::api::extractors::json::ApiJson;
use crate::api::validation::{blank_to_none, FieldErrors};
use crate::domain::models::template::{Template, CATEGORIES};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

fn validate(payload: &TemplateRequest) -> Result<String, AppError> {
    let category = payload.category.trim().to_uppercase();
    let mut errors = FieldErrors::new();
    errors.min_len("name", &payload.name, 2, "Name must be at least 2 characters");
    if !CATEGORIES.contains(&category.as_str()) {
        errors.push("category", "Category must be one of SEO, ADS, SOCIAL, CUSTOM");
    }
    errors.finish()?;
    Ok(category)
}

pub async fn list_templates(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
) -> Result<impl IntoResponse, AppError> {
    let templates = state.template_repo.list_visible(&ctx.team_id).await?;
    Ok(Json(templates))
}

pub async fn create_template(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
    ApiJson(payload): ApiJson<TemplateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let category = validate(&payload)?;
    let template = Template::custom(
        ctx.team_id.clone(),
        payload.name.trim().to_string(),
        blank_to_none(payload.description),
        category,
    );

    let created = state.template_repo.create(&template).await?;
    info!(team_id = %ctx.team_id, template_id = %created.id, "Created custom template");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_template(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
    Path(template_id): Path<String>,
    ApiJson(payload): ApiJson<TemplateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut template = find_editable(&state, &ctx, &template_id).await?;
    let category = validate(&payload)?;

    template.name = payload.name.trim().to_string();
    template.description = blank_to_none(payload.description);
    template.category = category;

    let updated = state.template_repo.update(&template).await?;
    info!("Updated template: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_template(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
    Path(template_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    find_editable(&state, &ctx, &template_id).await?;
    state.template_repo.delete(&ctx.team_id, &template_id).await?;
    info!("Deleted template: {}", template_id);
    Ok(StatusCode::NO_CONTENT)
}

async fn find_editable(state: &AppState, ctx: &TeamContext, template_id: &str) -> Result<Template, AppError> {
    let template = state.template_repo.find_visible(&ctx.team_id, template_id).await?
        .ok_or_else(|| AppError::NotFound("Template not found".into()))?;

    if !template.is_editable_by(&ctx.team_id) {
        return Err(AppError::Forbidden("Default templates cannot be modified".into()));
    }
    Ok(template)
}
