use crate::domain::{models::portfolio::Portfolio, ports::PortfolioRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqlitePortfolioRepo {
    pool: SqlitePool,
}

impl SqlitePortfolioRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PortfolioRepository for SqlitePortfolioRepo {
    async fn create(&self, portfolio: &Portfolio) -> Result<Portfolio, AppError> {
        sqlx::query_as::<_, Portfolio>(
            "INSERT INTO portfolios (id, photographer_id, title, description, images, category, is_published, views, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
            .bind(&portfolio.id)
            .bind(&portfolio.photographer_id)
            .bind(&portfolio.title)
            .bind(&portfolio.description)
            .bind(&portfolio.images)
            .bind(portfolio.category.as_str())
            .bind(portfolio.is_published)
            .bind(portfolio.views)
            .bind(portfolio.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Portfolio>, AppError> {
        sqlx::query_as::<_, Portfolio>("SELECT * FROM portfolios WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_photographer(&self, photographer_id: &str) -> Result<Vec<Portfolio>, AppError> {
        sqlx::query_as::<_, Portfolio>("SELECT * FROM portfolios WHERE photographer_id = ? ORDER BY created_at DESC")
            .bind(photographer_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_published_by_photographer(&self, photographer_id: &str) -> Result<Vec<Portfolio>, AppError> {
        sqlx::query_as::<_, Portfolio>("SELECT * FROM portfolios WHERE photographer_id = ? AND is_published = 1 ORDER BY created_at DESC")
            .bind(photographer_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, portfolio: &Portfolio) -> Result<Portfolio, AppError> {
        sqlx::query_as::<_, Portfolio>(
            "UPDATE portfolios SET title = ?, description = ?, images = ?, category = ?, is_published = ?, views = ? WHERE id = ? RETURNING *",
        )
            .bind(&portfolio.title)
            .bind(&portfolio.description)
            .bind(&portfolio.images)
            .bind(portfolio.category.as_str())
            .bind(portfolio.is_published)
            .bind(portfolio.views)
            .bind(&portfolio.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Portfolio not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM portfolios WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Portfolio not found".into()));
        }
        Ok(())
    }
}
