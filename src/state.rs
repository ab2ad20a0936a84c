use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{BookingRepository, PackageRepository, PortfolioRepository, UserRepository};
use crate::domain::services::{
    account_service::AccountService,
    booking_service::BookingService,
    package_quota::PackageQuota,
    package_service::PackageService,
    portfolio_service::PortfolioService,
    token_service::TokenService,
};
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub token_service: Arc<TokenService>,
    pub accounts: Arc<AccountService>,
    pub packages: Arc<PackageService>,
    pub portfolios: Arc<PortfolioService>,
    pub bookings: Arc<BookingService>,
}

impl AppState {
    /// Wires the domain services over the given repositories.
    pub fn new(
        config: Config,
        user_repo: Arc<dyn UserRepository>,
        package_repo: Arc<dyn PackageRepository>,
        portfolio_repo: Arc<dyn PortfolioRepository>,
        booking_repo: Arc<dyn BookingRepository>,
    ) -> Result<Self, AppError> {
        let token_service = Arc::new(TokenService::new(&config)?);
        let quota = Arc::new(PackageQuota::new(package_repo.clone()));

        Ok(Self {
            accounts: Arc::new(AccountService::new(user_repo.clone(), token_service.clone())),
            packages: Arc::new(PackageService::new(package_repo.clone(), quota)),
            portfolios: Arc::new(PortfolioService::new(portfolio_repo)),
            bookings: Arc::new(BookingService::new(
                booking_repo,
                user_repo,
                package_repo,
                config.strict_booking_transitions,
            )),
            token_service,
        })
    }
}
