use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::{admit, auth::AuthUser, ApiJson, ApiPath};
use crate::api::dtos::{requests::{CreatePackageRequest, UpdatePackageRequest}, responses::ApiResponse};
use crate::domain::services::package_service::{PackageDraft, PackagePatch};
use crate::domain::services::guard;
use crate::error::AppError;
use std::sync::Arc;

pub async fn create_package(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    body: Result<ApiJson<CreatePackageRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let payload = admit(&identity, guard::PHOTOGRAPHERS, body)?;
    let package = state.packages.create(&identity, PackageDraft {
        name: payload.name,
        description: payload.description,
        price: payload.price,
        duration: payload.duration,
        includes: payload.includes,
        is_active: payload.is_active,
    }).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(package))))
}

pub async fn list_own_packages(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let packages = state.packages.list_own(&identity).await?;
    Ok(Json(ApiResponse::list(packages)))
}

pub async fn list_public_packages(
    State(state): State<Arc<AppState>>,
    ApiPath(photographer_id): ApiPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let packages = state.packages.list_public(&photographer_id).await?;
    Ok(Json(ApiResponse::list(packages)))
}

pub async fn update_package(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    ApiPath(package_id): ApiPath<String>,
    body: Result<ApiJson<UpdatePackageRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let payload = admit(&identity, guard::PHOTOGRAPHERS, body)?;
    let package = state.packages.update(&identity, &package_id, PackagePatch {
        name: payload.name,
        description: payload.description,
        price: payload.price,
        duration: payload.duration,
        includes: payload.includes,
        is_active: payload.is_active,
    }).await?;

    Ok(Json(ApiResponse::ok(package)))
}

pub async fn delete_package(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    ApiPath(package_id): ApiPath<String>,
) -> Result<impl IntoResponse, AppError> {
    state.packages.delete(&identity, &package_id).await?;
    Ok(Json(ApiResponse::ok(serde_json::json!({}))))
}
