use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::{admit, auth::AuthUser, ApiJson, ApiPath};
use crate::api::dtos::{
    requests::{AddImagesRequest, CreatePortfolioRequest, UpdatePortfolioRequest},
    responses::{ApiResponse, UploadedImages},
};
use crate::domain::services::portfolio_service::{ImageUpload, PortfolioDraft, PortfolioPatch};
use crate::domain::services::guard;
use crate::error::AppError;
use std::sync::Arc;

pub async fn create_portfolio(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    body: Result<ApiJson<CreatePortfolioRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let payload = admit(&identity, guard::PHOTOGRAPHERS, body)?;
    let portfolio = state.portfolios.create(&identity, PortfolioDraft {
        title: payload.title,
        description: payload.description,
        category: payload.category,
        is_published: payload.is_published,
    }).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(portfolio))))
}

pub async fn list_own_portfolios(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let portfolios = state.portfolios.list_own(&identity).await?;
    Ok(Json(ApiResponse::list(portfolios)))
}

pub async fn list_public_portfolios(
    State(state): State<Arc<AppState>>,
    ApiPath(photographer_id): ApiPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let portfolios = state.portfolios.list_public(&photographer_id).await?;
    Ok(Json(ApiResponse::list(portfolios)))
}

pub async fn update_portfolio(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    ApiPath(portfolio_id): ApiPath<String>,
    body: Result<ApiJson<UpdatePortfolioRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let payload = admit(&identity, guard::PHOTOGRAPHERS, body)?;
    let portfolio = state.portfolios.update(&identity, &portfolio_id, PortfolioPatch {
        title: payload.title,
        description: payload.description,
        category: payload.category,
        is_published: payload.is_published,
    }).await?;

    Ok(Json(ApiResponse::ok(portfolio)))
}

pub async fn delete_portfolio(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    ApiPath(portfolio_id): ApiPath<String>,
) -> Result<impl IntoResponse, AppError> {
    state.portfolios.delete(&identity, &portfolio_id).await?;
    Ok(Json(ApiResponse::ok(serde_json::json!({}))))
}

pub async fn add_images(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    ApiPath(portfolio_id): ApiPath<String>,
    body: Result<ApiJson<AddImagesRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let payload = admit(&identity, guard::PHOTOGRAPHERS, body)?;
    let uploads = payload.images
        .into_iter()
        .map(|img| ImageUpload { url: img.url, caption: img.caption })
        .collect();

    let (portfolio, uploaded) = state.portfolios.add_images(&identity, &portfolio_id, uploads).await?;
    Ok(Json(ApiResponse::ok(UploadedImages { portfolio, uploaded })))
}

pub async fn delete_image(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    ApiPath((portfolio_id, image_id)): ApiPath<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let portfolio = state.portfolios.delete_image(&identity, &portfolio_id, &image_id).await?;
    Ok(Json(ApiResponse::ok(portfolio)))
}
