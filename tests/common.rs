use photo_booking_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::repositories::{
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_package_repo::SqlitePackageRepo,
        sqlite_portfolio_repo::SqlitePortfolioRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
};
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    Router,
};
use tower::ServiceExt;
use serde_json::{json, Value};

pub const PASSWORD: &str = "correct-horse-battery";

pub fn test_config(database_url: &str) -> Config {
    Config {
        database_url: database_url.to_string(),
        port: 0,
        jwt_secret_key: include_str!("../tests/keys/test_private.pem").to_string(),
        jwt_public_key: include_str!("../tests/keys/test_public.pem").to_string(),
        auth_issuer: "test-issuer".to_string(),
        token_ttl_hours: 1,
        diagnostics: false,
        strict_booking_transitions: false,
    }
}

#[allow(dead_code)]
pub struct Account {
    pub token: String,
    pub user_id: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        Self::build(|_| {}).await
    }

    pub async fn with_strict_transitions() -> Self {
        Self::build(|config| config.strict_booking_transitions = true).await
    }

    async fn build(customize: impl FnOnce(&mut Config)) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(10));

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let mut config = test_config(&db_url);
        customize(&mut config);

        let state = Arc::new(AppState::new(
            config,
            Arc::new(SqliteUserRepo::new(pool.clone())),
            Arc::new(SqlitePackageRepo::new(pool.clone())),
            Arc::new(SqlitePortfolioRepo::new(pool.clone())),
            Arc::new(SqliteBookingRepo::new(pool.clone())),
        ).expect("Failed to build test state"));

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn send(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, body)
    }

    pub async fn register(&self, full_name: &str, email: &str, role: &str) -> Account {
        let (status, body) = self.send("POST", "/api/auth/register", None, Some(json!({
            "fullName": full_name,
            "email": email,
            "password": PASSWORD,
            "role": role,
        }))).await;

        if status != StatusCode::CREATED {
            panic!("Registration failed in test helper: status {} body {}", status, body);
        }

        Account {
            token: body["token"].as_str().expect("No token in body").to_string(),
            user_id: body["userId"].as_str().expect("No userId in body").to_string(),
        }
    }

    pub async fn create_package(&self, account: &Account, name: &str, price: f64) -> (StatusCode, Value) {
        self.send("POST", "/api/packages", Some(&account.token), Some(json!({
            "name": name,
            "description": format!("{} description", name),
            "price": price,
            "duration": "2 hours",
            "includes": ["edited photos"],
        }))).await
    }

    pub async fn count_rows(&self, sql: &str, bind: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(sql)
            .bind(bind)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
