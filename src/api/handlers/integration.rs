use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::ConnectIntegrationRequest;
use crate::api::extractors::team::TeamContext;
use crate::api::extractors::json::ApiJson;
use crate::api::handlers::client::find_client;
use crate::api::validation::blank_to_none;
use crate::domain::models::integration::{find_provider, summarize_providers, Integration};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

/// Provider catalog with per-team connection counts.
pub async fn list_providers(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
) -> Result<impl IntoResponse, AppError> {
    let integrations = state.integration_repo.list_by_team(&ctx.team_id).await?;
    let total_clients = state.client_repo.count_by_team(&ctx.team_id).await?;
    Ok(Json(summarize_providers(&integrations, total_clients.max(0) as usize)))
}

pub async fn list_client_integrations(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
    Path(client_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let client = find_client(&state, &ctx.team_id, &client_id).await?;
    let integrations = state.integration_repo.list_by_client(&client.id).await?;
    Ok(Json(integrations))
}

/// Connects a provider for the client, replacing any earlier connection to the same provider.
pub async fn connect_integration(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
    Path(client_id): Path<String>,
    ApiJson(payload): ApiJson<ConnectIntegrationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let client = find_client(&state, &ctx.team_id, &client_id).await?;

    let provider = find_provider(&payload.provider.trim().to_uppercase())
        .ok_or_else(|| AppError::Validation(format!("Unknown provider {}", payload.provider)))?;
    if !provider.available {
        return Err(AppError::Validation(format!("{} is coming soon", provider.name)));
    }

    let integration = Integration::connect(client.id.clone(), provider, blank_to_none(payload.account_id));
    let saved = state.integration_repo.upsert(&integration).await?;

    info!(client_id = %client.id, provider = %saved.provider, status = %saved.status, "Connected integration");
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn disconnect_integration(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
    Path((client_id, integration_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let client = find_client(&state, &ctx.team_id, &client_id).await?;
    state.integration_repo.delete(&client.id, &integration_id).await?;
    info!("Disconnected integration {} from client {}", integration_id, client.id);
    Ok(StatusCode::NO_CONTENT)
}
