use std::sync::Arc;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use serde_json::{Map, Value};
use sqlx::types::Json;
use crate::domain::models::{
    auth::Identity,
    user::{Role, User},
};
use crate::domain::ports::UserRepository;
use crate::domain::services::{guard, photographer_filter::PhotographerFilter, token_service::TokenService};
use crate::error::AppError;
use tracing::{info, warn};

pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

pub struct Credentials {
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

#[derive(Default)]
pub struct ProfilePatch {
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub specialty: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub categories: Option<Vec<String>>,
    pub profile_image: Option<String>,
}

/// A freshly issued session for an account.
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Registration, login and self-service on user records.
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    pub async fn register(&self, registration: Registration) -> Result<Session, AppError> {
        let email = normalize_email(&registration.email);
        if registration.full_name.trim().is_empty() {
            return Err(AppError::Validation("Please add a name".into()));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::Validation("Please add a valid email".into()));
        }
        if registration.password.len() < 6 {
            return Err(AppError::Validation("Password must be at least 6 characters".into()));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::Validation("User already exists".into()));
        }

        let password_hash = hash_password(&registration.password)?;
        let user = User::new(
            registration.full_name.trim().to_string(),
            email,
            password_hash,
            registration.role.unwrap_or(Role::User),
        );
        let created = self.users.create(&user).await?;

        info!(role = %created.role, "Registered account: {}", created.id);
        let token = self.tokens.issue(&created)?;
        Ok(Session { token, user: created })
    }

    /// A requested role other than `admin` must match the account's role.
    /// The issued token always carries the account's real role.
    pub async fn login(&self, credentials: Credentials) -> Result<Session, AppError> {
        let email = normalize_email(&credentials.email);
        if email.is_empty() || credentials.password.is_empty() {
            return Err(AppError::Validation("Please provide an email and password".into()));
        }

        let user = self.users.find_by_email(&email).await?
            .ok_or_else(invalid_credentials)?;

        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|_| AppError::InternalWithMsg(format!("Stored password hash unreadable for {}", user.id)))?;
        Argon2::default().verify_password(credentials.password.as_bytes(), &parsed_hash)
            .map_err(|_| invalid_credentials())?;

        if let Some(requested) = credentials.role.filter(|r| *r != Role::Admin && *r != user.role) {
            warn!(user_id = %user.id, "Login as {} refused for {} account", requested, user.role);
            return Err(AppError::Unauthenticated(format!("Account exists but not as a {}", requested)));
        }

        info!("User logged in: {}", user.id);
        let token = self.tokens.issue(&user)?;
        Ok(Session { token, user })
    }

    pub async fn me(&self, identity: &Identity) -> Result<User, AppError> {
        self.users.find_by_id(&identity.subject).await?
            .ok_or(AppError::NotFound("User not found".into()))
    }

    pub async fn update_profile(&self, identity: &Identity, patch: ProfilePatch) -> Result<User, AppError> {
        guard::authorize(identity, guard::PHOTOGRAPHERS)?;
        let mut user = self.me(identity).await?;

        if let Some(full_name) = patch.full_name {
            if full_name.trim().is_empty() {
                return Err(AppError::Validation("Please add a name".into()));
            }
            user.full_name = full_name.trim().to_string();
        }
        if let Some(price) = patch.price {
            if !price.is_finite() || price < 0.0 {
                return Err(AppError::Validation("Price must be a non-negative number".into()));
            }
            user.price = Some(price);
        }
        if let Some(bio) = patch.bio {
            user.bio = Some(bio);
        }
        if let Some(specialty) = patch.specialty {
            user.specialty = Some(specialty);
        }
        if let Some(location) = patch.location {
            user.location = Some(location);
        }
        if let Some(categories) = patch.categories {
            user.categories = Json(categories);
        }
        if let Some(profile_image) = patch.profile_image {
            user.profile_image = Some(profile_image);
        }

        let updated = self.users.update_profile(&user).await?;
        info!("Profile updated: {}", updated.id);
        Ok(updated)
    }

    pub async fn set_portfolio_urls(&self, identity: &Identity, urls: Vec<String>) -> Result<Vec<String>, AppError> {
        guard::authorize(identity, guard::PHOTOGRAPHERS)?;
        let mut user = self.me(identity).await?;
        user.portfolio = Json(urls);
        let updated = self.users.update_profile(&user).await?;
        Ok(updated.portfolio.0)
    }

    pub async fn set_availability(&self, identity: &Identity, availability: Map<String, Value>) -> Result<Map<String, Value>, AppError> {
        guard::authorize(identity, guard::PHOTOGRAPHERS)?;
        let mut user = self.me(identity).await?;
        user.availability = Json(availability);
        let updated = self.users.update_profile(&user).await?;
        Ok(updated.availability.0)
    }

    pub async fn directory(&self, filter: &PhotographerFilter) -> Result<Vec<User>, AppError> {
        let photographers = self.users.list_by_role(Role::Photographer).await?;
        Ok(filter.apply(photographers))
    }

    pub async fn photographer(&self, id: &str) -> Result<User, AppError> {
        self.users.find_by_id(id).await?
            .filter(|u| u.role == Role::Photographer)
            .ok_or(AppError::NotFound("Photographer not found".into()))
    }

    pub async fn list_by_role(&self, identity: &Identity, role: Role) -> Result<Vec<User>, AppError> {
        guard::authorize(identity, guard::ADMINS)?;
        self.users.list_by_role(role).await
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn invalid_credentials() -> AppError {
    AppError::Unauthenticated("Invalid credentials".into())
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalWithMsg(format!("Password hashing failed: {}", e)))
}
