use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use crate::api::dtos::requests::{CreateReportRequest, ReportQuery};
use crate::api::dtos::responses::ReportDetail;
use crate::api::extractors::team::TeamContext;
use crate::api::extractors::json::ApiJson;
use crate::api::handlers::client::find_client;
use crate::api::validation::{blank_to_none, FieldErrors};
use crate::domain::models::job::{Job, GENERATE_REPORT, SEND_REPORT};
use crate::domain::models::report::{Report, ReportStatus};
use crate::domain::ports::ReportFilter;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn list_reports(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let status = match blank_to_none(query.status) {
        Some(raw) => Some(
            ReportStatus::parse(&raw)
                .ok_or_else(|| AppError::Validation(format!("Unknown report status {}", raw)))?
                .as_str()
                .to_string(),
        ),
        None => None,
    };

    let filter = ReportFilter {
        status,
        client_id: blank_to_none(query.client_id),
        limit: None,
    };

    let reports = state.report_repo.list_by_team(&ctx.team_id, &filter).await?;
    Ok(Json(reports))
}

/// Final step of the report wizard: stores a DRAFT report.
pub async fn create_report(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
    ApiJson(payload): ApiJson<CreateReportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut errors = FieldErrors::new();
    if payload.client_id.trim().is_empty() {
        errors.push("client_id", "Please select a client");
    }
    if payload.template_id.trim().is_empty() {
        errors.push("template_id", "Please select a template");
    }
    match (payload.date_from, payload.date_to) {
        (Some(from), Some(to)) if from > to => errors.push("date_to", "End date must be on or after the start date"),
        (None, _) => errors.push("date_from", "Start date is required"),
        (_, None) => errors.push("date_to", "End date is required"),
        _ => {}
    }
    errors.finish()?;

    let (Some(date_from), Some(date_to)) = (payload.date_from, payload.date_to) else {
        return Err(AppError::Validation("Date range is required".into()));
    };

    let client = find_client(&state, &ctx.team_id, payload.client_id.trim()).await?;
    let template = state.template_repo.find_visible(&ctx.team_id, payload.template_id.trim()).await?
        .ok_or_else(|| AppError::NotFound("Template not found".into()))?;

    let name = blank_to_none(payload.name).unwrap_or_else(|| format!("{} Report", client.name));

    let report = Report::draft(
        ctx.team_id.clone(),
        client.id,
        template.id,
        name,
        date_from,
        date_to,
        ctx.user.id.clone(),
    );

    let created = state.report_repo.create(&report).await?;
    info!(team_id = %ctx.team_id, report_id = %created.id, "Created draft report");

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_report(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
    Path(report_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let report = find_report(&state, &ctx.team_id, &report_id).await?;
    let client = find_client(&state, &ctx.team_id, &report.client_id).await?;
    let template = match &report.template_id {
        Some(id) => state.template_repo.find_visible(&ctx.team_id, id).await?,
        None => None,
    };
    let jobs = state.job_repo.list_for_report(&report.id).await?;

    Ok(Json(ReportDetail { report, client, template, jobs }))
}

pub async fn delete_report(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
    Path(report_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let report = find_report(&state, &ctx.team_id, &report_id).await?;
    state.job_repo.cancel_for_report(&report.id).await?;
    state.report_repo.delete(&ctx.team_id, &report.id).await?;
    info!("Deleted report: {}", report.id);
    Ok(StatusCode::NO_CONTENT)
}

/// Moves the report to GENERATING and queues the render job.
pub async fn generate_report(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
    Path(report_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut report = find_report(&state, &ctx.team_id, &report_id).await?;
    report.begin_generation()?;

    let report = state.report_repo.update(&report).await?;
    let job = state.job_repo.create(&Job::new(GENERATE_REPORT, report.id.clone(), ctx.team_id.clone())).await?;

    info!(report_id = %report.id, job_id = %job.id, "Queued report generation");
    Ok((StatusCode::ACCEPTED, Json(report)))
}

/// Queues delivery of a completed report to the client's email address.
pub async fn send_report(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
    Path(report_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let report = find_report(&state, &ctx.team_id, &report_id).await?;
    report.ensure_sendable()?;

    let client = find_client(&state, &ctx.team_id, &report.client_id).await?;
    if client.email.is_none() {
        return Err(AppError::Validation("Client has no email address".into()));
    }

    let job = state.job_repo.create(&Job::new(SEND_REPORT, report.id.clone(), ctx.team_id.clone())).await?;

    info!(report_id = %report.id, job_id = %job.id, "Queued report delivery");
    Ok((StatusCode::ACCEPTED, Json(report)))
}

pub async fn report_document(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
    Path(report_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let report = find_report(&state, &ctx.team_id, &report_id).await?;
    let html = report.document_html
        .ok_or_else(|| AppError::NotFound("Report has not been generated yet".into()))?;
    Ok(Html(html))
}

async fn find_report(state: &AppState, team_id: &str, report_id: &str) -> Result<Report, AppError> {
    state.report_repo.find_by_id(team_id, report_id).await?
        .ok_or_else(|| AppError::NotFound("Report not found".into()))
}
