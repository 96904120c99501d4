use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use crate::error::AppError;

/// `axum::Json` whose rejections come back as the API's `{error}` body with 400.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
