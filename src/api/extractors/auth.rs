use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, Method},
};
use crate::domain::models::user::User;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::{warn, Span};

pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Signed-in user, resolved from the `access_token` cookie.
///
/// State-changing requests must also echo the session's CSRF token in `X-CSRF-Token`.
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = parts.extensions.get::<Cookies>()
            .ok_or(AppError::InternalWithMsg("Cookie layer missing".into()))?;

        let access_token = cookies.get("access_token")
            .ok_or(AppError::Unauthorized)?
            .value()
            .to_string();

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);
        let claims = app_state.auth_service.verify_access_token(&access_token)?;

        if !is_safe_method(&parts.method) {
            let csrf_header_val = parts.headers.get(CSRF_HEADER)
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| AppError::Forbidden("Missing CSRF token".into()))?;

            if csrf_header_val != claims.csrf {
                warn!(user_id = %claims.sub, "CSRF token mismatch");
                return Err(AppError::Forbidden("Invalid CSRF token".into()));
            }
        }

        let user = app_state.user_repo.find_by_id(&claims.sub).await?
            .ok_or(AppError::Unauthorized)?;

        Span::current().record("user_id", user.id.as_str());

        Ok(AuthUser(user))
    }
}

fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}
