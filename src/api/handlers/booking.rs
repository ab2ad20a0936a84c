use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::{admit, auth::AuthUser, ApiJson, ApiPath};
use crate::api::dtos::{requests::{CreateBookingRequest, UpdateBookingStatusRequest}, responses::ApiResponse};
use crate::domain::services::booking_service::NewBooking;
use crate::domain::services::guard;
use crate::error::AppError;
use std::sync::Arc;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    body: Result<ApiJson<CreateBookingRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let payload = admit(&identity, guard::CUSTOMERS, body)?;
    let booking = state.bookings.create(&identity, NewBooking {
        photographer_id: payload.photographer,
        package_id: payload.package,
        date: payload.date,
        location: payload.location,
        notes: payload.notes,
    }).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(booking))))
}

pub async fn list_user_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.bookings.list_for_customer(&identity).await?;
    Ok(Json(ApiResponse::list(bookings)))
}

pub async fn list_photographer_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.bookings.list_for_photographer(&identity).await?;
    Ok(Json(ApiResponse::list(bookings)))
}

pub async fn list_all_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.bookings.list_all(&identity).await?;
    Ok(Json(ApiResponse::list(bookings)))
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    ApiPath(booking_id): ApiPath<String>,
    body: Result<ApiJson<UpdateBookingStatusRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let payload = admit(&identity, guard::PHOTOGRAPHERS_AND_ADMINS, body)?;
    let booking = state.bookings.update_status(&identity, &booking_id, payload.status).await?;
    Ok(Json(ApiResponse::ok(booking)))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    ApiPath(booking_id): ApiPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.bookings.cancel(&identity, &booking_id).await?;
    Ok(Json(ApiResponse::ok(booking)))
}
