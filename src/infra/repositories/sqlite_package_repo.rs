use crate::domain::{models::package::Package, ports::PackageRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use tracing::error;

pub struct SqlitePackageRepo {
    pool: SqlitePool,
}

impl SqlitePackageRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PackageRepository for SqlitePackageRepo {
    async fn count_by_photographer(&self, photographer_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM packages WHERE photographer_id = ?")
            .bind(photographer_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    // SQLite admits a single writer, so the count subquery and the insert
    // observe the same snapshot.
    async fn create_within_quota(&self, package: &Package, limit: i64) -> Result<Option<Package>, AppError> {
        sqlx::query_as::<_, Package>(
            "INSERT INTO packages (id, photographer_id, name, description, price, duration, includes, is_active, created_at) \
             SELECT ?, ?, ?, ?, ?, ?, ?, ?, ? \
             WHERE (SELECT COUNT(*) FROM packages WHERE photographer_id = ?) < ? \
             RETURNING *",
        )
            .bind(&package.id)
            .bind(&package.photographer_id)
            .bind(&package.name)
            .bind(&package.description)
            .bind(package.price)
            .bind(&package.duration)
            .bind(&package.includes)
            .bind(package.is_active)
            .bind(package.created_at)
            .bind(&package.photographer_id)
            .bind(limit)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("SQLite Package Creation Failed: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Package>, AppError> {
        sqlx::query_as::<_, Package>("SELECT * FROM packages WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_photographer(&self, photographer_id: &str) -> Result<Vec<Package>, AppError> {
        sqlx::query_as::<_, Package>("SELECT * FROM packages WHERE photographer_id = ? ORDER BY created_at ASC")
            .bind(photographer_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_active_by_photographer(&self, photographer_id: &str) -> Result<Vec<Package>, AppError> {
        sqlx::query_as::<_, Package>("SELECT * FROM packages WHERE photographer_id = ? AND is_active = 1 ORDER BY created_at ASC")
            .bind(photographer_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, package: &Package) -> Result<Package, AppError> {
        sqlx::query_as::<_, Package>(
            "UPDATE packages SET name = ?, description = ?, price = ?, duration = ?, includes = ?, is_active = ? WHERE id = ? RETURNING *",
        )
            .bind(&package.name)
            .bind(&package.description)
            .bind(package.price)
            .bind(&package.duration)
            .bind(&package.includes)
            .bind(package.is_active)
            .bind(&package.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Package not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM packages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Package not found".into()));
        }
        Ok(())
    }
}
