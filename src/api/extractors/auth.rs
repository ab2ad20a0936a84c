use axum::{
    extract::{FromRequestParts, FromRef},
    http::{header, request::Parts},
};
use crate::state::AppState;
use crate::domain::models::auth::Identity;
use crate::error::AppError;
use std::sync::Arc;
use tracing::Span;

/// The verified caller. Only authenticates; role and ownership checks happen
/// in the domain services.
pub struct AuthUser(pub Identity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts.headers.get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(AppError::unauthenticated)?;

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);
        let identity = app_state.token_service.verify(token)?;

        Span::current().record("user_id", identity.subject.as_str());
        Span::current().record("role", identity.role.as_str());

        Ok(AuthUser(identity))
    }
}
