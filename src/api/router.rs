use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{admin, auth, booking, health, package, photographer, portfolio};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))

        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", get(auth::logout))

        // Directory (public)
        .route("/api/categories", get(photographer::list_categories))
        .route("/api/photographers", get(photographer::list_photographers))
        .route("/api/photographers/{id}", get(photographer::get_photographer))

        // Photographer self-service
        .route("/api/photographers/profile", put(photographer::update_profile))
        .route("/api/photographers/portfolio", put(photographer::update_portfolio_urls))
        .route("/api/photographers/availability", put(photographer::update_availability))

        // Packages
        .route("/api/packages", get(package::list_own_packages).post(package::create_package))
        .route("/api/packages/{id}", put(package::update_package).delete(package::delete_package))
        .route("/api/packages/photographer/{photographer_id}", get(package::list_public_packages))

        // Portfolios
        .route("/api/portfolio", get(portfolio::list_own_portfolios).post(portfolio::create_portfolio))
        .route("/api/portfolio/{id}", put(portfolio::update_portfolio).delete(portfolio::delete_portfolio))
        .route("/api/portfolio/{id}/images", post(portfolio::add_images))
        .route("/api/portfolio/{id}/images/{image_id}", delete(portfolio::delete_image))
        .route("/api/portfolio/photographer/{photographer_id}", get(portfolio::list_public_portfolios))

        // Bookings
        .route("/api/bookings", get(booking::list_all_bookings).post(booking::create_booking))
        .route("/api/bookings/user", get(booking::list_user_bookings))
        .route("/api/bookings/photographer", get(booking::list_photographer_bookings))
        .route("/api/bookings/{id}", put(booking::update_booking_status))
        .route("/api/bookings/{id}/cancel", put(booking::cancel_booking))

        // Admin
        .route("/api/admin/users", get(admin::list_customers))
        .route("/api/admin/photographers", get(admin::list_photographers))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                        role = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
