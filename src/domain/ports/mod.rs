use crate::domain::models::{
    user::{Role, User}, package::Package, portfolio::Portfolio,
    booking::{Booking, BookingScope, BookingStatus, BookingView},
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, AppError>;
    async fn update_profile(&self, user: &User) -> Result<User, AppError>;
}

#[async_trait]
pub trait PackageRepository: Send + Sync {
    async fn count_by_photographer(&self, photographer_id: &str) -> Result<i64, AppError>;
    /// Inserts only while the photographer owns fewer than `limit` packages.
    /// Returns `None` when the cap was already reached at insert time.
    async fn create_within_quota(&self, package: &Package, limit: i64) -> Result<Option<Package>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Package>, AppError>;
    async fn list_by_photographer(&self, photographer_id: &str) -> Result<Vec<Package>, AppError>;
    async fn list_active_by_photographer(&self, photographer_id: &str) -> Result<Vec<Package>, AppError>;
    async fn update(&self, package: &Package) -> Result<Package, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait PortfolioRepository: Send + Sync {
    async fn create(&self, portfolio: &Portfolio) -> Result<Portfolio, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Portfolio>, AppError>;
    async fn list_by_photographer(&self, photographer_id: &str) -> Result<Vec<Portfolio>, AppError>;
    async fn list_published_by_photographer(&self, photographer_id: &str) -> Result<Vec<Portfolio>, AppError>;
    async fn update(&self, portfolio: &Portfolio) -> Result<Portfolio, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Booking, AppError>;
    /// Moves the booking to `status` only if it is still in `expected`.
    /// Returns `None` when the conditional update matched nothing.
    async fn transition_status(&self, id: &str, expected: BookingStatus, status: BookingStatus) -> Result<Option<Booking>, AppError>;
    /// Cancels unless the booking is already in a terminal state.
    /// Returns `None` when the conditional update matched nothing.
    async fn cancel_if_open(&self, id: &str) -> Result<Option<Booking>, AppError>;
    /// Newest booking date first, references projected.
    async fn list_views(&self, scope: &BookingScope) -> Result<Vec<BookingView>, AppError>;
}
