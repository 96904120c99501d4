use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use tokio::time::sleep;
use tracing::{error, info, warn, info_span, Instrument};
use crate::domain::models::job::{Job, JobPayload, GENERATE_REPORT, SEND_REPORT};
use crate::domain::models::report::ReportStatus;
use crate::domain::services::report_document::{document_link, document_url, render_delivery_email, ReportDocument};
use crate::error::AppError;
use crate::state::AppState;

const POLL_INTERVAL: Duration = Duration::from_secs(5);
const BATCH_SIZE: i32 = 10;

pub async fn start_background_worker(state: Arc<AppState>) {
    info!("Starting background job worker...");

    loop {
        run_pending_jobs(&state).await;
        sleep(POLL_INTERVAL).await;
    }
}

/// Claims one batch of due jobs and runs them in order. Returns how many were claimed.
pub async fn run_pending_jobs(state: &Arc<AppState>) -> usize {
    let jobs = match state.job_repo.find_pending(BATCH_SIZE).await {
        Ok(jobs) => jobs,
        Err(e) => {
            error!("Failed to fetch pending jobs: {:?}", e);
            return 0;
        }
    };

    let claimed = jobs.len();
    for job in jobs {
        let span = info_span!(
            "background_job",
            job_id = %job.id,
            job_type = %job.job_type,
            team_id = %job.payload.team_id,
            report_id = %job.payload.report_id,
        );

        async {
            info!("Processing job: {}", job.job_type);
            match process_job(state, &job).await {
                Ok(_) => {
                    info!("Job completed successfully");
                    if let Err(e) = state.job_repo.update_status(&job.id, "COMPLETED", None).await {
                        error!("Failed to mark job as completed: {:?}", e);
                    }
                }
                Err(e) => {
                    let err_msg = format!("{}", e);
                    error!("Job failed with error: {}", err_msg);
                    if let Err(up_err) = state.job_repo.update_status(&job.id, "FAILED", Some(err_msg)).await {
                        error!("Failed to mark job as failed: {:?}", up_err);
                    }
                }
            }
        }
            .instrument(span)
            .await;
    }

    claimed
}

async fn process_job(state: &AppState, job: &Job) -> Result<(), AppError> {
    match job.job_type.as_str() {
        GENERATE_REPORT => generate_report(state, &job.payload).await,
        SEND_REPORT => deliver_report(state, &job.payload).await,
        other => Err(AppError::InternalWithMsg(format!("Unknown job type {}", other))),
    }
}

async fn generate_report(state: &AppState, payload: &JobPayload) -> Result<(), AppError> {
    let mut report = state.report_repo.find_by_id(&payload.team_id, &payload.report_id).await?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", payload.report_id)))?;

    if report.status()? != ReportStatus::Generating {
        warn!("Report is {} rather than GENERATING, skipping", report.status);
        return Ok(());
    }

    let rendered = render_report(state, &report).await;
    match rendered {
        Ok(html) => {
            report.complete_generation(html, document_url(&report.id));
            state.report_repo.update(&report).await?;
            if let Some(template_id) = &report.template_id {
                state.template_repo.increment_usage(template_id).await?;
            }
            info!("Report document generated");
            Ok(())
        }
        Err(e) => {
            report.fail(e.to_string());
            state.report_repo.update(&report).await?;
            Err(e)
        }
    }
}

async fn render_report(state: &AppState, report: &crate::domain::models::report::Report) -> Result<String, AppError> {
    let team = state.team_repo.find_by_id(&report.team_id).await?
        .ok_or_else(|| AppError::NotFound(format!("Team {} not found", report.team_id)))?;
    let client = state.client_repo.find_by_id(&report.team_id, &report.client_id).await?
        .ok_or_else(|| AppError::NotFound(format!("Client {} not found", report.client_id)))?;
    let template = match &report.template_id {
        Some(id) => state.template_repo.find_visible(&report.team_id, id).await?,
        None => None,
    };
    let integrations = state.integration_repo.list_by_client(&client.id).await?;

    ReportDocument {
        team: &team,
        client: &client,
        report,
        template: template.as_ref(),
        integrations: &integrations,
        generated_at: Utc::now(),
    }
        .render(&state.templates)
}

async fn deliver_report(state: &AppState, payload: &JobPayload) -> Result<(), AppError> {
    let mut report = state.report_repo.find_by_id(&payload.team_id, &payload.report_id).await?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", payload.report_id)))?;
    report.ensure_sendable()?;

    let client = state.client_repo.find_by_id(&report.team_id, &report.client_id).await?
        .ok_or_else(|| AppError::NotFound(format!("Client {} not found", report.client_id)))?;
    let recipient = client.email.as_deref()
        .ok_or_else(|| AppError::Validation("Client has no email address".into()))?;
    let document = report.document_html.as_deref()
        .ok_or_else(|| AppError::Validation("Report has no generated document".into()))?;

    let subject = format!("{} for {}", report.name, client.name);
    let attachment_name = format!("report-{}-{}.html", report.date_from, report.date_to);
    let link = document_link(&state.config.app_url, &report.id);
    let body = render_delivery_email(&state.templates, &report, &client, &link)?;

    state.email_service
        .send(recipient, &subject, &body, Some(&attachment_name), Some(document.as_bytes()))
        .await?;

    report.mark_sent();
    state.report_repo.update(&report).await?;
    info!("Report delivered to {}", recipient);
    Ok(())
}
