use std::sync::Arc;
use sqlx::types::Json;
use crate::domain::models::{
    auth::Identity,
    portfolio::{Category, Portfolio, PortfolioImage},
};
use crate::domain::ports::PortfolioRepository;
use crate::domain::services::{featured::recompute_featured, guard, keyed_lock::KeyedLocks};
use crate::error::AppError;
use tracing::info;

const TITLE_MAX: usize = 100;
const DESCRIPTION_MAX: usize = 500;
pub const MAX_IMAGES_PER_UPLOAD: usize = 10;

pub struct PortfolioDraft {
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub is_published: Option<bool>,
}

#[derive(Default)]
pub struct PortfolioPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub is_published: Option<bool>,
}

/// An image already placed in asset storage; only its URL is recorded here.
pub struct ImageUpload {
    pub url: String,
    pub caption: Option<String>,
}

/// Writes to one portfolio rewrite its whole row, so they are serialized
/// per portfolio from the read through the write.
pub struct PortfolioService {
    repo: Arc<dyn PortfolioRepository>,
    locks: KeyedLocks,
}

impl PortfolioService {
    pub fn new(repo: Arc<dyn PortfolioRepository>) -> Self {
        Self { repo, locks: KeyedLocks::new() }
    }

    pub async fn create(&self, identity: &Identity, draft: PortfolioDraft) -> Result<Portfolio, AppError> {
        guard::authorize(identity, guard::PHOTOGRAPHERS)?;

        validate_title(&draft.title)?;
        if let Some(description) = &draft.description {
            validate_description(description)?;
        }

        let portfolio = Portfolio::new(
            identity.subject.clone(),
            draft.title,
            draft.description,
            draft.category,
            draft.is_published.unwrap_or(true),
        );

        let created = self.repo.create(&portfolio).await?;
        info!(photographer_id = %identity.subject, "Portfolio created: {}", created.id);
        Ok(created)
    }

    pub async fn list_own(&self, identity: &Identity) -> Result<Vec<Portfolio>, AppError> {
        guard::authorize(identity, guard::PHOTOGRAPHERS)?;
        self.repo.list_by_photographer(&identity.subject).await
    }

    /// Published portfolios only; no authentication required.
    pub async fn list_public(&self, photographer_id: &str) -> Result<Vec<Portfolio>, AppError> {
        self.repo.list_published_by_photographer(photographer_id).await
    }

    pub async fn update(&self, identity: &Identity, portfolio_id: &str, patch: PortfolioPatch) -> Result<Portfolio, AppError> {
        guard::authorize(identity, guard::PHOTOGRAPHERS)?;

        let _guard = self.locks.acquire(portfolio_id).await;
        let mut portfolio = self.find(portfolio_id).await?;
        guard::authorize_ownership(identity, &portfolio, "update this portfolio")?;

        if let Some(title) = patch.title {
            validate_title(&title)?;
            portfolio.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            validate_description(&description)?;
            portfolio.description = Some(description);
        }
        if let Some(category) = patch.category {
            portfolio.category = category;
        }
        if let Some(is_published) = patch.is_published {
            portfolio.is_published = is_published;
        }

        self.repo.update(&portfolio).await
    }

    pub async fn delete(&self, identity: &Identity, portfolio_id: &str) -> Result<(), AppError> {
        guard::authorize(identity, guard::PHOTOGRAPHERS)?;

        let _guard = self.locks.acquire(portfolio_id).await;
        let portfolio = self.find(portfolio_id).await?;
        guard::authorize_ownership(identity, &portfolio, "delete this portfolio")?;

        self.repo.delete(&portfolio.id).await?;
        info!(photographer_id = %identity.subject, "Portfolio deleted: {}", portfolio.id);
        Ok(())
    }

    /// Appends images in order; the featured invariant is recomputed afterwards.
    pub async fn add_images(&self, identity: &Identity, portfolio_id: &str, uploads: Vec<ImageUpload>) -> Result<(Portfolio, Vec<String>), AppError> {
        guard::authorize(identity, guard::PHOTOGRAPHERS)?;

        let _guard = self.locks.acquire(portfolio_id).await;
        let mut portfolio = self.find(portfolio_id).await?;
        guard::authorize_ownership(identity, &portfolio, "update this portfolio")?;

        if uploads.is_empty() {
            return Err(AppError::Validation("Please upload at least one image".into()));
        }
        if uploads.len() > MAX_IMAGES_PER_UPLOAD {
            return Err(AppError::Validation(format!("At most {} images can be uploaded at once", MAX_IMAGES_PER_UPLOAD)));
        }
        if uploads.iter().any(|u| u.url.trim().is_empty()) {
            return Err(AppError::Validation("Every image needs a url".into()));
        }

        let uploaded: Vec<String> = uploads.iter().map(|u| u.url.clone()).collect();

        let mut images = std::mem::take(&mut portfolio.images.0);
        images.extend(uploads.into_iter().map(|u| PortfolioImage::new(u.url, u.caption)));
        portfolio.images = Json(recompute_featured(images));

        let updated = self.repo.update(&portfolio).await?;
        info!(photographer_id = %identity.subject, "Added {} images to portfolio {}", uploaded.len(), updated.id);
        Ok((updated, uploaded))
    }

    pub async fn delete_image(&self, identity: &Identity, portfolio_id: &str, image_id: &str) -> Result<Portfolio, AppError> {
        guard::authorize(identity, guard::PHOTOGRAPHERS)?;

        let _guard = self.locks.acquire(portfolio_id).await;
        let mut portfolio = self.find(portfolio_id).await?;
        guard::authorize_ownership(identity, &portfolio, "update this portfolio")?;

        let mut images = std::mem::take(&mut portfolio.images.0);
        let idx = images.iter().position(|img| img.id == image_id)
            .ok_or(AppError::NotFound("Image not found in portfolio".into()))?;
        let removed = images.remove(idx);
        portfolio.images = Json(recompute_featured(images));

        let updated = self.repo.update(&portfolio).await?;
        info!(photographer_id = %identity.subject, "Removed image {} ({}) from portfolio {}", removed.id, removed.url, updated.id);
        Ok(updated)
    }

    async fn find(&self, portfolio_id: &str) -> Result<Portfolio, AppError> {
        self.repo.find_by_id(portfolio_id).await?
            .ok_or(AppError::NotFound("Portfolio not found".into()))
    }
}

fn validate_title(title: &str) -> Result<(), AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Please add a title".into()));
    }
    if title.chars().count() > TITLE_MAX {
        return Err(AppError::Validation(format!("Title cannot be more than {} characters", TITLE_MAX)));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), AppError> {
    if description.chars().count() > DESCRIPTION_MAX {
        return Err(AppError::Validation(format!("Description cannot be more than {} characters", DESCRIPTION_MAX)));
    }
    Ok(())
}
