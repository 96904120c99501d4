use chrono::{DateTime, Utc};
use serde::Serialize;
use tera::{Context, Tera};
use tracing::error;

use crate::domain::models::{
    client::Client, integration::{find_provider, Integration}, report::Report, team::Team, template::Template,
};
use crate::error::AppError;

pub const REPORT_TEMPLATE: &str = "report.html";
pub const DELIVERY_TEMPLATE: &str = "report_email.html";

pub fn load_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (REPORT_TEMPLATE, include_str!("../../../templates/report.html")),
        (DELIVERY_TEMPLATE, include_str!("../../../templates/report_email.html")),
    ])?;
    Ok(tera)
}

pub fn document_url(report_id: &str) -> String {
    format!("/api/reports/{}/document", report_id)
}

/// Absolute link to the document, for use outside the app (emails).
pub fn document_link(app_url: &str, report_id: &str) -> String {
    format!("{}{}", app_url.trim_end_matches('/'), document_url(report_id))
}

/// Cover note sent to the client; the document itself travels as an attachment.
pub fn render_delivery_email(tera: &Tera, report: &Report, client: &Client, report_link: &str) -> Result<String, AppError> {
    let mut context = Context::new();
    context.insert("report", report);
    context.insert("client", client);
    context.insert("report_link", report_link);

    tera.render(DELIVERY_TEMPLATE, &context).map_err(|e| {
        error!("Delivery email rendering failed: {:?}", e);
        AppError::InternalWithMsg(format!("Delivery email rendering failed: {}", e))
    })
}

#[derive(Serialize)]
struct DataSource {
    name: String,
    status: String,
    account_id: Option<String>,
    last_sync_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
pub struct ReportDocument<'a> {
    pub team: &'a Team,
    pub client: &'a Client,
    pub report: &'a Report,
    pub template: Option<&'a Template>,
    pub integrations: &'a [Integration],
    pub generated_at: DateTime<Utc>,
}

impl ReportDocument<'_> {
    pub fn render(&self, tera: &Tera) -> Result<String, AppError> {
        let sources: Vec<DataSource> = self.integrations.iter()
            .filter(|i| i.is_active())
            .map(|i| DataSource {
                name: find_provider(&i.provider).map(|p| p.name.to_string()).unwrap_or_else(|| i.provider.clone()),
                status: i.status.clone(),
                account_id: i.account_id.clone(),
                last_sync_at: i.last_sync_at,
            })
            .collect();

        let mut context = Context::new();
        context.insert("team", self.team);
        context.insert("client", self.client);
        context.insert("report", self.report);
        context.insert("template", &self.template);
        context.insert("sources", &sources);
        context.insert("period_days", &((self.report.date_to - self.report.date_from).num_days() + 1));
        context.insert("generated_at", &self.generated_at.format("%Y-%m-%d %H:%M UTC").to_string());

        tera.render(REPORT_TEMPLATE, &context).map_err(|e| {
            error!("Report template rendering failed: {:?}", e);
            AppError::InternalWithMsg(format!("Report rendering failed: {}", e))
        })
    }
}
