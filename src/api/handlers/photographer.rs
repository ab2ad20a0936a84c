use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::{admit, auth::AuthUser, ApiJson, ApiPath, ApiQuery};
use crate::api::dtos::{
    requests::{AvailabilityRequest, PhotographerQuery, PortfolioUrlsRequest, UpdateProfileRequest},
    responses::{ApiResponse, CategoryEntry},
};
use crate::domain::models::portfolio::Category;
use crate::domain::services::{account_service::ProfilePatch, guard, photographer_filter::PhotographerFilter};
use crate::error::AppError;
use std::sync::Arc;

pub async fn list_photographers(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<PhotographerQuery>,
) -> Result<impl IntoResponse, AppError> {
    let categories = query.categories.unwrap_or_default();

    let filter = PhotographerFilter::new()
        .with_categories(categories.split(','))
        .with_min_price(query.min_price)
        .with_max_price(query.max_price)
        .with_search(query.search.as_deref());

    let photographers = state.accounts.directory(&filter).await?;
    Ok(Json(ApiResponse::list(photographers)))
}

pub async fn get_photographer(
    State(state): State<Arc<AppState>>,
    ApiPath(photographer_id): ApiPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let photographer = state.accounts.photographer(&photographer_id).await?;
    Ok(Json(ApiResponse::ok(photographer)))
}

pub async fn list_categories() -> impl IntoResponse {
    let categories: Vec<CategoryEntry> = Category::ALL
        .iter()
        .map(|c| CategoryEntry { id: c.as_str(), name: c.display_name() })
        .collect();
    Json(ApiResponse::list(categories))
}

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    body: Result<ApiJson<UpdateProfileRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let payload = admit(&identity, guard::PHOTOGRAPHERS, body)?;
    let user = state.accounts.update_profile(&identity, ProfilePatch {
        full_name: payload.full_name,
        bio: payload.bio,
        specialty: payload.specialty,
        location: payload.location,
        price: payload.price,
        categories: payload.categories,
        profile_image: payload.profile_image,
    }).await?;

    Ok(Json(ApiResponse::ok(user)))
}

pub async fn update_portfolio_urls(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    body: Result<ApiJson<PortfolioUrlsRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let payload = admit(&identity, guard::PHOTOGRAPHERS, body)?;
    let urls = state.accounts.set_portfolio_urls(&identity, payload.portfolio).await?;
    Ok(Json(ApiResponse::ok(urls)))
}

pub async fn update_availability(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    body: Result<ApiJson<AvailabilityRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let payload = admit(&identity, guard::PHOTOGRAPHERS, body)?;
    let availability = state.accounts.set_availability(&identity, payload.availability).await?;
    Ok(Json(ApiResponse::ok(availability)))
}
