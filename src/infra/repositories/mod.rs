pub mod sqlite_booking_repo;
pub mod sqlite_package_repo;
pub mod sqlite_portfolio_repo;
pub mod sqlite_user_repo;

pub mod postgres_booking_repo;
pub mod postgres_package_repo;
pub mod postgres_portfolio_repo;
pub mod postgres_user_repo;
