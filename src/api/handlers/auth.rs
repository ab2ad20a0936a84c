use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::{requests::{LoginRequest, RegisterRequest}, responses::ApiResponse};
use crate::api::extractors::{auth::AuthUser, ApiJson};
use crate::domain::models::auth::AuthResponse;
use crate::domain::services::account_service::{Credentials, Registration, Session};
use std::sync::Arc;
use tracing::info;

pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.accounts.register(Registration {
        full_name: payload.full_name,
        email: payload.email,
        password: payload.password,
        role: payload.role,
    }).await?;

    Ok((StatusCode::CREATED, Json(auth_response(session))))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.accounts.login(Credentials {
        email: payload.email,
        password: payload.password,
        role: payload.role,
    }).await?;

    Ok(Json(auth_response(session)))
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let user = state.accounts.me(&identity).await?;
    Ok(Json(ApiResponse::ok(user)))
}

// Tokens are stateless; the client discards its copy.
pub async fn logout(AuthUser(identity): AuthUser) -> impl IntoResponse {
    info!("User logged out: {}", identity.subject);
    Json(ApiResponse::ok(serde_json::json!({})))
}

fn auth_response(session: Session) -> AuthResponse {
    AuthResponse {
        success: true,
        token: session.token,
        role: session.user.role,
        user_id: session.user.id,
    }
}
