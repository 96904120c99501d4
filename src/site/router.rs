use axum::{
    body::Body,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

use crate::domain::services::content::ContentError;
use crate::site::pages;
use crate::site::state::SiteState;

#[derive(Deserialize)]
pub struct ProjectsQuery {
    pub level: Option<String>,
}

pub fn create_site_router(state: SiteState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/guides", get(guides))
        .route("/guides/{slug}", get(guide))
        .route("/projects", get(projects))
        .route("/projects/{level}/{slug}", get(project))
        .route("/roadmap", get(roadmap))
        .fallback(fallback)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    info_span!(
                        "site_request",
                        request_id = %Uuid::new_v4(),
                        method = ?request.method(),
                        uri = ?request.uri(),
                    )
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(status = response.status().as_u16(), latency_ms = latency.as_millis(), "served page");
                }),
        )
        .with_state(state)
}

/// Turns a rendered page or a content failure into an HTML response.
fn respond(state: &SiteState, page: Result<String, ContentError>) -> Response {
    match page {
        Ok(html) => Html(html).into_response(),
        Err(ContentError::NotFound) => not_found_page(state, "The page you are looking for does not exist."),
        Err(e) => {
            error!("Failed to render page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Html("<h1>Internal error</h1>".to_string())).into_response()
        }
    }
}

fn not_found_page(state: &SiteState, message: &str) -> Response {
    let body = pages::not_found(state, message).unwrap_or_else(|e| {
        error!("Failed to render not-found page: {}", e);
        "<h1>Page not found</h1>".to_string()
    });
    (StatusCode::NOT_FOUND, Html(body)).into_response()
}

async fn home(State(state): State<SiteState>) -> Response {
    respond(&state, pages::home(&state))
}

async fn guides(State(state): State<SiteState>) -> Response {
    respond(&state, pages::guides(&state))
}

async fn guide(State(state): State<SiteState>, Path(slug): Path<String>) -> Response {
    respond(&state, pages::guide(&state, &slug))
}

async fn projects(State(state): State<SiteState>, Query(query): Query<ProjectsQuery>) -> Response {
    let level = query.level.as_deref().filter(|l| !l.is_empty());
    respond(&state, pages::projects(&state, level))
}

async fn project(State(state): State<SiteState>, Path((level, slug)): Path<(String, String)>) -> Response {
    respond(&state, pages::project(&state, &level, &slug))
}

async fn roadmap(State(state): State<SiteState>) -> Response {
    respond(&state, pages::roadmap(&state))
}

async fn fallback(State(state): State<SiteState>) -> Response {
    not_found_page(&state, "The page you are looking for does not exist.")
}
