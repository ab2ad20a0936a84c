use crate::domain::{models::package::Package, ports::PackageRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Row};

pub struct PostgresPackageRepo {
    pool: PgPool,
}

impl PostgresPackageRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PackageRepository for PostgresPackageRepo {
    async fn count_by_photographer(&self, photographer_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM packages WHERE photographer_id = $1").bind(photographer_id).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    // The owner's user row is the lock that serializes concurrent creations.
    async fn create_within_quota(&self, package: &Package, limit: i64) -> Result<Option<Package>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        sqlx::query("SELECT id FROM users WHERE id = $1 FOR UPDATE").bind(&package.photographer_id).fetch_optional(&mut *tx).await.map_err(AppError::Database)?;

        let count: i64 = sqlx::query("SELECT COUNT(*) as count FROM packages WHERE photographer_id = $1").bind(&package.photographer_id).fetch_one(&mut *tx).await.map_err(AppError::Database)?.get("count");
        if count >= limit {
            tx.rollback().await.map_err(AppError::Database)?;
            return Ok(None);
        }

        let created = sqlx::query_as::<_, Package>("INSERT INTO packages (id, photographer_id, name, description, price, duration, includes, is_active, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *")
            .bind(&package.id).bind(&package.photographer_id).bind(&package.name).bind(&package.description).bind(package.price)
            .bind(&package.duration).bind(&package.includes).bind(package.is_active).bind(package.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(Some(created))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Package>, AppError> {
        sqlx::query_as::<_, Package>("SELECT * FROM packages WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_photographer(&self, photographer_id: &str) -> Result<Vec<Package>, AppError> {
        sqlx::query_as::<_, Package>("SELECT * FROM packages WHERE photographer_id = $1 ORDER BY created_at ASC").bind(photographer_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_active_by_photographer(&self, photographer_id: &str) -> Result<Vec<Package>, AppError> {
        sqlx::query_as::<_, Package>("SELECT * FROM packages WHERE photographer_id = $1 AND is_active = TRUE ORDER BY created_at ASC").bind(photographer_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, package: &Package) -> Result<Package, AppError> {
        sqlx::query_as::<_, Package>("UPDATE packages SET name = $1, description = $2, price = $3, duration = $4, includes = $5, is_active = $6 WHERE id = $7 RETURNING *")
            .bind(&package.name).bind(&package.description).bind(package.price).bind(&package.duration).bind(&package.includes).bind(package.is_active).bind(&package.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Package not found".into()))
    }
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM packages WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Package not found".into())); }
        Ok(())
    }
}
