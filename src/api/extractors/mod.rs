use axum::extract::{FromRequest, FromRequestParts};
use crate::domain::{models::{auth::Identity, user::Role}, services::guard};
use crate::error::AppError;

pub mod auth;

/// `axum::Json` with rejections rendered in the API error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Unwraps a request body only after the caller's role is admitted, so a
/// caller outside `roles` is refused with 403 whatever the body holds.
pub fn admit<T>(identity: &Identity, roles: &[Role], body: Result<ApiJson<T>, AppError>) -> Result<T, AppError> {
    guard::authorize(identity, roles)?;
    body.map(|ApiJson(payload)| payload)
}
