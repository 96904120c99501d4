use axum::{
    body::Body,
    extract::Request,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, client, dashboard, health, integration, report, team, template, user};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/refresh", post(auth::refresh))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/session", get(auth::session))
        .route("/api/users/me", put(user::update_me))

        // Team
        .route("/api/team", get(team::get_team).put(team::update_team))
        .route("/api/team/members", get(team::list_members).post(team::add_member))
        .route("/api/team/members/{user_id}", put(team::update_member_role).delete(team::remove_member))

        // Clients & integrations
        .route("/api/clients", get(client::list_clients).post(client::create_client))
        .route("/api/clients/{id}", get(client::get_client).put(client::update_client).delete(client::delete_client))
        .route("/api/clients/{id}/integrations", get(integration::list_client_integrations).post(integration::connect_integration))
        .route("/api/clients/{id}/integrations/{integration_id}", delete(integration::disconnect_integration))
        .route("/api/integrations", get(integration::list_providers))

        // Templates
        .route("/api/templates", get(template::list_templates).post(template::create_template))
        .route("/api/templates/{id}", put(template::update_template).delete(template::delete_template))

        // Reports
        .route("/api/reports", get(report::list_reports).post(report::create_report))
        .route("/api/reports/{id}", get(report::get_report).delete(report::delete_report))
        .route("/api/reports/{id}/generate", post(report::generate_report))
        .route("/api/reports/{id}/send", post(report::send_report))
        .route("/api/reports/{id}/document", get(report::report_document))

        .route("/api/dashboard/stats", get(dashboard::stats))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        team_id = tracing::field::Empty,
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
