use axum::{extract::State, response::IntoResponse, Json};
use chrono::{DateTime, Datelike, TimeZone, Utc};
use crate::api::dtos::responses::DashboardStats;
use crate::api::extractors::team::TeamContext;
use crate::domain::ports::ReportFilter;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;

const RECENT_REPORTS: i64 = 5;

pub async fn stats(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
) -> Result<impl IntoResponse, AppError> {
    let total_clients = state.client_repo.count_by_team(&ctx.team_id).await?;
    let report_stats = state.report_repo.stats(&ctx.team_id, month_start(Utc::now())).await?;
    let active_integrations = state.integration_repo.list_by_team(&ctx.team_id).await?
        .iter()
        .filter(|i| i.is_active())
        .count();
    let recent_reports = state.report_repo
        .list_by_team(&ctx.team_id, &ReportFilter { limit: Some(RECENT_REPORTS), ..Default::default() })
        .await?;

    Ok(Json(DashboardStats {
        total_clients,
        reports_generated: report_stats.generated,
        active_integrations,
        reports_this_month: report_stats.this_month,
        recent_reports,
    }))
}

/// Midnight UTC on the first day of `now`'s month.
pub fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let first = now.date_naive().with_day(1).unwrap_or_else(|| now.date_naive());
    first.and_hms_opt(0, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_start_truncates_to_first_of_month() {
        let now = Utc.with_ymd_and_hms(2025, 3, 17, 14, 5, 9).unwrap();
        assert_eq!(month_start(now), Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap());
    }
}
