use std::sync::Arc;
use crate::domain::{models::package::Package, ports::PackageRepository};
use crate::domain::services::keyed_lock::KeyedLocks;
use crate::error::AppError;
use tracing::{info, warn};

pub const MAX_PACKAGES_PER_PHOTOGRAPHER: i64 = 3;

/// `count(packages owned by photographer) < MAX_PACKAGES_PER_PHOTOGRAPHER`.
pub async fn can_create(repo: &dyn PackageRepository, photographer_id: &str) -> Result<bool, AppError> {
    let count = repo.count_by_photographer(photographer_id).await?;
    Ok(count < MAX_PACKAGES_PER_PHOTOGRAPHER)
}

/// Guards package creation against the per-photographer cap.
///
/// The count check and the insert are not atomic on their own. Creation is
/// serialized per photographer inside this process, and the insert itself is
/// conditional on the count so that other processes sharing the database
/// cannot push a photographer over the cap either.
pub struct PackageQuota {
    repo: Arc<dyn PackageRepository>,
    limit: i64,
    locks: KeyedLocks,
}

impl PackageQuota {
    pub fn new(repo: Arc<dyn PackageRepository>) -> Self {
        Self::with_limit(repo, MAX_PACKAGES_PER_PHOTOGRAPHER)
    }

    pub fn with_limit(repo: Arc<dyn PackageRepository>, limit: i64) -> Self {
        Self {
            repo,
            limit,
            locks: KeyedLocks::new(),
        }
    }

    pub async fn create(&self, package: &Package) -> Result<Package, AppError> {
        let _guard = self.locks.acquire(&package.photographer_id).await;

        if self.repo.count_by_photographer(&package.photographer_id).await? >= self.limit {
            warn!(photographer_id = %package.photographer_id, "Package quota reached");
            return Err(quota_exceeded(self.limit));
        }

        let created = self.repo.create_within_quota(package, self.limit).await?
            .ok_or_else(|| {
                warn!(photographer_id = %package.photographer_id, "Package quota reached at insert time");
                quota_exceeded(self.limit)
            })?;

        info!(photographer_id = %created.photographer_id, "Package created: {}", created.id);
        Ok(created)
    }
}

fn quota_exceeded(limit: i64) -> AppError {
    AppError::QuotaExceeded(format!("You can only create up to {} packages", limit))
}
