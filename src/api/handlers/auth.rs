use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::{LoginRequest, RegisterRequest};
use crate::api::dtos::responses::{RegisterResponse, SessionResponse};
use crate::api::extractors::team::TeamContext;
use crate::api::extractors::json::ApiJson;
use crate::api::validation::FieldErrors;
use crate::config::Config;
use crate::domain::models::auth::{AuthResponse, TokenPair};
use crate::domain::models::team::{Team, TeamMember, TeamRole};
use crate::domain::models::user::{normalize_email, User, DUPLICATE_EMAIL};
use crate::domain::services::auth_service::{ACCESS_TOKEN_MINUTES, REFRESH_TOKEN_DAYS};
use crate::domain::services::password::{hash_password, verify_password};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use time::Duration;
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};
use tracing::{info, warn};

pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    FieldErrors::new()
        .min_len("name", &payload.name, 2, "Name must be at least 2 characters")
        .email("email", &payload.email)
        .min_len("password", &payload.password, 8, "Password must be at least 8 characters")
        .finish()?;

    let email = normalize_email(&payload.email);
    if state.user_repo.find_by_email(&email).await?.is_some() {
        return Err(AppError::Validation(DUPLICATE_EMAIL.into()));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = User::new(payload.name.trim().to_string(), email, Some(password_hash));
    let team = Team::default_for(&user.id, &user.name);
    let owner = TeamMember::new(team.id.clone(), user.id.clone(), TeamRole::Owner);

    let created = state.user_repo.create_with_team(&user, &team, &owner).await?;

    info!(user_id = %created.id, team_id = %team.id, "Registered user with default team");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully".to_string(),
            user_id: created.id,
        }),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = normalize_email(&payload.email);
    let user = state.user_repo.find_by_email(&email).await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&payload.password, user.password_hash.as_deref()) {
        warn!(user_id = %user.id, "Rejected login with bad credentials");
        return Err(AppError::Unauthorized);
    }

    let tokens = state.auth_service.login(&user).await?;
    set_cookies(&cookies, &state.config, &tokens);

    info!("User logged in: {}", user.id);

    Ok(Json(AuthResponse {
        csrf_token: tokens.csrf_token,
        user: user.into(),
    }))
}

pub async fn refresh(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> Result<impl IntoResponse, AppError> {
    let refresh_cookie = cookies.get("refresh_token").ok_or(AppError::Unauthorized)?;
    let raw_token = refresh_cookie.value().to_string();

    let token_hash = state.auth_service.hash_token(&raw_token);
    let record = state.auth_repo.find_refresh_token(&token_hash).await?
        .ok_or(AppError::Unauthorized)?;

    let user = state.user_repo.find_by_id(&record.user_id).await?
        .ok_or(AppError::Unauthorized)?;

    let tokens = state.auth_service.refresh(&raw_token, &user).await?;
    set_cookies(&cookies, &state.config, &tokens);

    info!("Token refreshed for user: {}", user.id);

    Ok(Json(AuthResponse {
        csrf_token: tokens.csrf_token,
        user: user.into(),
    }))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> Result<impl IntoResponse, AppError> {
    if let Some(cookie) = cookies.get("refresh_token") {
        if let Err(e) = state.auth_service.logout(cookie.value()).await {
            warn!("Failed to revoke refresh token family: {}", e);
        }
    }

    cookies.remove(Cookie::build(("access_token", "")).path("/").into());
    cookies.remove(Cookie::build(("refresh_token", "")).path("/").into());

    info!("User logged out");

    Ok(StatusCode::OK)
}

pub async fn session(
    State(state): State<Arc<AppState>>,
    ctx: TeamContext,
) -> Result<impl IntoResponse, AppError> {
    let team = state.team_repo.find_by_id(&ctx.team_id).await?
        .ok_or_else(|| AppError::NotFound("No team found".into()))?;

    Ok(Json(SessionResponse {
        role: ctx.role.as_str().to_string(),
        user: ctx.user.into(),
        team,
    }))
}

fn set_cookies(cookies: &Cookies, config: &Config, tokens: &TokenPair) {
    let mut access_c = Cookie::new("access_token", tokens.access_token.clone());
    access_c.set_http_only(true);
    access_c.set_secure(config.cookie_secure);
    access_c.set_same_site(SameSite::Strict);
    access_c.set_path("/");
    access_c.set_max_age(Duration::minutes(ACCESS_TOKEN_MINUTES));
    cookies.add(access_c);

    let mut refresh_c = Cookie::new("refresh_token", tokens.refresh_token.clone());
    refresh_c.set_http_only(true);
    refresh_c.set_secure(config.cookie_secure);
    refresh_c.set_same_site(SameSite::Strict);
    refresh_c.set_path("/");
    refresh_c.set_max_age(Duration::days(REFRESH_TOKEN_DAYS));
    cookies.add(refresh_c);
}
