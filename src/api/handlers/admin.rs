use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::responses::ApiResponse;
use crate::domain::models::user::Role;
use crate::error::AppError;
use std::sync::Arc;

pub async fn list_customers(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let users = state.accounts.list_by_role(&identity, Role::User).await?;
    Ok(Json(ApiResponse::list(users)))
}

pub async fn list_photographers(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let photographers = state.accounts.list_by_role(&identity, Role::Photographer).await?;
    Ok(Json(ApiResponse::list(photographers)))
}
