use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use std::collections::HashMap;
use crate::api::dtos::requests::ClientRequest;
use crate::api::extractors::team::TeamContext;
use crate::api::extractors::json::ApiJson;
use crate::api::validation::{blank_to_none, FieldErrors};
use crate::domain::models::client::{Client, ClientOverview, ReportCount};
use crate::domain::models::integration::Integration;
use crate::domain::ports::ReportFilter;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

fn validate(payload: &ClientRequest) -> Result<(), AppError> {
    FieldErrors::new()
        .min_len("name", &payload.name, 2, "Name must be at least 2 characters")
        .optional_email("email", payload.email.as_deref())
        .optional_url("website", payload.website.as_deref())
        .optional_url("logo_url", payload.logo_url.as_deref())
        .finish()
}

fn apply(client: &mut Client, payload: ClientRequest) {
    client.name = payload.name.trim().to_string();
    client.email = blank_to_none(payload.email).map(|e| e.to_lowercase());
    client.website = blank_to_none(payload.website);
    client.industry = blank_to_none(payload.industry);
    client.description = blank_to_none(payload.description);
    client.logo_url = blank_to_none(payload.logo_url);
}

/// Team clients, newest first, with their integrations and report tally.
pub async fn list_clients(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
) -> Result<impl IntoResponse, AppError> {
    let clients = state.client_repo.list_by_team(&ctx.team_id).await?;

    let mut by_client: HashMap<String, Vec<Integration>> = HashMap::new();
    for integration in state.integration_repo.list_by_team(&ctx.team_id).await? {
        by_client.entry(integration.client_id.clone()).or_default().push(integration);
    }

    let overview: Vec<ClientOverview> = clients
        .into_iter()
        .map(|row| ClientOverview {
            integrations: by_client.remove(&row.client.id).unwrap_or_default(),
            count: ReportCount { reports: row.report_count },
            client: row.client,
        })
        .collect();

    Ok(Json(overview))
}

pub async fn create_client(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
    ApiJson(payload): ApiJson<ClientRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate(&payload)?;

    let mut client = Client::new(ctx.team_id.clone(), String::new());
    apply(&mut client, payload);

    let created = state.client_repo.create(&client).await?;
    info!(team_id = %ctx.team_id, client_id = %created.id, "Created client");

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_client(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
    Path(client_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let client = find_client(&state, &ctx.team_id, &client_id).await?;
    let integrations = state.integration_repo.list_by_client(&client.id).await?;
    let reports = state.report_repo
        .list_by_team(&ctx.team_id, &ReportFilter { client_id: Some(client.id.clone()), ..Default::default() })
        .await?;

    Ok(Json(ClientOverview {
        client,
        integrations,
        count: ReportCount { reports: reports.len() as i64 },
    }))
}

pub async fn update_client(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
    Path(client_id): Path<String>,
    ApiJson(payload): ApiJson<ClientRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate(&payload)?;

    let mut client = find_client(&state, &ctx.team_id, &client_id).await?;
    apply(&mut client, payload);
    client.updated_at = Utc::now();

    let updated = state.client_repo.update(&client).await?;
    info!("Updated client: {}", updated.id);
    Ok(Json(updated))
}

/// Integrations and reports go with the client.
pub async fn delete_client(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
    Path(client_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.client_repo.delete(&ctx.team_id, &client_id).await?;
    info!("Deleted client: {}", client_id);
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn find_client(state: &AppState, team_id: &str, client_id: &str) -> Result<Client, AppError> {
    state.client_repo.find_by_id(team_id, client_id).await?
        .ok_or_else(|| AppError::NotFound("Client not found".into()))
}
