use std::sync::Arc;
use sqlx::types::Json;
use crate::domain::models::{
    auth::Identity,
    package::{NewPackageParams, Package},
};
use crate::domain::ports::PackageRepository;
use crate::domain::services::{guard, package_quota::PackageQuota};
use crate::error::AppError;
use tracing::info;

const NAME_MAX: usize = 100;
const DESCRIPTION_MAX: usize = 500;

pub struct PackageDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration: String,
    pub includes: Vec<String>,
    pub is_active: Option<bool>,
}

#[derive(Default)]
pub struct PackagePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub duration: Option<String>,
    pub includes: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

pub struct PackageService {
    repo: Arc<dyn PackageRepository>,
    quota: Arc<PackageQuota>,
}

impl PackageService {
    pub fn new(repo: Arc<dyn PackageRepository>, quota: Arc<PackageQuota>) -> Self {
        Self { repo, quota }
    }

    pub async fn create(&self, identity: &Identity, draft: PackageDraft) -> Result<Package, AppError> {
        guard::authorize(identity, guard::PHOTOGRAPHERS)?;

        validate_name(&draft.name)?;
        validate_description(&draft.description)?;
        validate_price(draft.price)?;
        validate_duration(&draft.duration)?;

        let package = Package::new(NewPackageParams {
            photographer_id: identity.subject.clone(),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            duration: draft.duration,
            includes: clean_includes(draft.includes),
            is_active: draft.is_active.unwrap_or(true),
        });

        self.quota.create(&package).await
    }

    pub async fn list_own(&self, identity: &Identity) -> Result<Vec<Package>, AppError> {
        guard::authorize(identity, guard::PHOTOGRAPHERS)?;
        self.repo.list_by_photographer(&identity.subject).await
    }

    /// Active packages only; no authentication required.
    pub async fn list_public(&self, photographer_id: &str) -> Result<Vec<Package>, AppError> {
        self.repo.list_active_by_photographer(photographer_id).await
    }

    pub async fn update(&self, identity: &Identity, package_id: &str, patch: PackagePatch) -> Result<Package, AppError> {
        guard::authorize(identity, guard::PHOTOGRAPHERS)?;

        let mut package = self.find(package_id).await?;
        guard::authorize_ownership(identity, &package, "update this package")?;

        if let Some(name) = patch.name {
            validate_name(&name)?;
            package.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            validate_description(&description)?;
            package.description = description;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
            package.price = price;
        }
        if let Some(duration) = patch.duration {
            validate_duration(&duration)?;
            package.duration = duration;
        }
        if let Some(includes) = patch.includes {
            package.includes = Json(clean_includes(includes));
        }
        if let Some(is_active) = patch.is_active {
            package.is_active = is_active;
        }

        let updated = self.repo.update(&package).await?;
        info!(photographer_id = %identity.subject, "Package updated: {}", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, identity: &Identity, package_id: &str) -> Result<(), AppError> {
        guard::authorize(identity, guard::PHOTOGRAPHERS)?;

        let package = self.find(package_id).await?;
        guard::authorize_ownership(identity, &package, "delete this package")?;

        self.repo.delete(&package.id).await?;
        info!(photographer_id = %identity.subject, "Package deleted: {}", package.id);
        Ok(())
    }

    async fn find(&self, package_id: &str) -> Result<Package, AppError> {
        self.repo.find_by_id(package_id).await?
            .ok_or(AppError::NotFound("Package not found".into()))
    }
}

fn validate_name(name: &str) -> Result<(), AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Please add a package name".into()));
    }
    if name.chars().count() > NAME_MAX {
        return Err(AppError::Validation(format!("Name cannot be more than {} characters", NAME_MAX)));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), AppError> {
    if description.trim().is_empty() {
        return Err(AppError::Validation("Please add a package description".into()));
    }
    if description.chars().count() > DESCRIPTION_MAX {
        return Err(AppError::Validation(format!("Description cannot be more than {} characters", DESCRIPTION_MAX)));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::Validation("Price must be a non-negative number".into()));
    }
    Ok(())
}

fn validate_duration(duration: &str) -> Result<(), AppError> {
    if duration.trim().is_empty() {
        return Err(AppError::Validation("Please add a duration".into()));
    }
    Ok(())
}

fn clean_includes(includes: Vec<String>) -> Vec<String> {
    includes
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_fields_are_bounded() {
        assert!(validate_name("Wedding day").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(101)).is_err());
        assert!(validate_description(&"y".repeat(500)).is_ok());
        assert!(validate_description(&"y".repeat(501)).is_err());
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(-1.0).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_duration("").is_err());
    }

    #[test]
    fn blank_inclusions_are_dropped() {
        let cleaned = clean_includes(vec![" prints ".into(), "".into(), "album".into()]);
        assert_eq!(cleaned, vec!["prints".to_string(), "album".to_string()]);
    }
}
