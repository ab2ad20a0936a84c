use crate::domain::{models::user::{Role, User}, ports::UserRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepo {
    async fn create(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>("INSERT INTO users (id, full_name, email, password_hash, role, bio, specialty, location, price, profile_image, categories, portfolio, availability, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) RETURNING *")
            .bind(&user.id).bind(&user.full_name).bind(&user.email).bind(&user.password_hash).bind(user.role.as_str())
            .bind(&user.bio).bind(&user.specialty).bind(&user.location).bind(user.price).bind(&user.profile_image)
            .bind(&user.categories).bind(&user.portfolio).bind(&user.availability).bind(user.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1").bind(email).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE role = $1 ORDER BY created_at DESC").bind(role.as_str()).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update_profile(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>("UPDATE users SET full_name = $1, bio = $2, specialty = $3, location = $4, price = $5, profile_image = $6, categories = $7, portfolio = $8, availability = $9 WHERE id = $10 RETURNING *")
            .bind(&user.full_name).bind(&user.bio).bind(&user.specialty).bind(&user.location).bind(user.price)
            .bind(&user.profile_image).bind(&user.categories).bind(&user.portfolio).bind(&user.availability).bind(&user.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("User not found".into()))
    }
}
