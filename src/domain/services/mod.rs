pub mod account_service;
pub mod booking_service;
pub mod featured;
pub mod guard;
pub mod keyed_lock;
pub mod package_quota;
pub mod package_service;
pub mod photographer_filter;
pub mod portfolio_service;
pub mod token_service;
