mod common;

use axum::http::StatusCode;
use common::TestApp;
use photo_booking_backend::{
    domain::{
        models::{package::{NewPackageParams, Package}, user::{Role, User}},
        ports::{PackageRepository, UserRepository},
    },
    infra::repositories::{sqlite_package_repo::SqlitePackageRepo, sqlite_user_repo::SqliteUserRepo},
};
use serde_json::json;
use std::sync::Arc;
use tokio::task::JoinSet;

fn package_for(photographer_id: &str, n: usize) -> Package {
    Package::new(NewPackageParams {
        photographer_id: photographer_id.to_string(),
        name: format!("Package {}", n),
        description: "Half day session".into(),
        price: 250.0,
        duration: "4 hours".into(),
        includes: vec!["gallery".into()],
        is_active: true,
    })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_package_creation_through_the_api() {
    let app = Arc::new(TestApp::new().await);
    let jane = app.register("Jane", "jane@example.com", "photographer").await;
    let token = Arc::new(jane.token);

    let mut set = JoinSet::new();
    for n in 0..8 {
        let app = app.clone();
        let token = token.clone();
        set.spawn(async move {
            app.send("POST", "/api/packages", Some(token.as_str()), Some(json!({
                "name": format!("Package {}", n),
                "description": "Concurrent",
                "price": 100.0,
                "duration": "1 hour",
            }))).await
        });
    }

    let mut created = 0;
    let mut rejected = 0;
    while let Some(joined) = set.join_next().await {
        let (status, body) = joined.unwrap();
        match status {
            StatusCode::CREATED => created += 1,
            StatusCode::BAD_REQUEST => {
                assert_eq!(body["message"], "You can only create up to 3 packages");
                rejected += 1;
            }
            other => panic!("unexpected status {}: {}", other, body),
        }
    }

    assert_eq!(created, 3);
    assert_eq!(rejected, 5);
    assert_eq!(app.count_rows("SELECT COUNT(*) FROM packages WHERE photographer_id = ?", &jane.user_id).await, 3);
}

// Bypasses the in-process lock: the conditional insert alone must hold the cap.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_conditional_insert_holds_the_cap_without_the_process_lock() {
    let app = TestApp::new().await;
    let users = SqliteUserRepo::new(app.pool.clone());
    let photographer = users.create(&User::new("Omar".into(), "omar@example.com".into(), "x".into(), Role::Photographer)).await.unwrap();

    let repo = Arc::new(SqlitePackageRepo::new(app.pool.clone()));
    let mut set = JoinSet::new();
    for n in 0..6 {
        let repo = repo.clone();
        let package = package_for(&photographer.id, n);
        set.spawn(async move { repo.create_within_quota(&package, 3).await });
    }

    let mut inserted = 0;
    let mut refused = 0;
    while let Some(joined) = set.join_next().await {
        match joined.unwrap().unwrap() {
            Some(_) => inserted += 1,
            None => refused += 1,
        }
    }

    assert_eq!(inserted, 3);
    assert_eq!(refused, 3);
    assert_eq!(repo.count_by_photographer(&photographer.id).await.unwrap(), 3);
}

#[tokio::test]
async fn test_quota_frees_up_after_delete() {
    let app = TestApp::new().await;
    let jane = app.register("Jane", "jane@example.com", "photographer").await;

    let mut ids = Vec::new();
    for n in 0..3 {
        let (_, body) = app.create_package(&jane, &format!("P{}", n), 10.0).await;
        ids.push(body["data"]["id"].as_str().unwrap().to_string());
    }
    let (status, _) = app.create_package(&jane, "P3", 10.0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.send("DELETE", &format!("/api/packages/{}", ids[0]), Some(&jane.token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.create_package(&jane, "P3", 10.0).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_public_packages_only_list_active_ones() {
    let app = TestApp::new().await;
    let jane = app.register("Jane", "jane@example.com", "photographer").await;

    let (_, body) = app.create_package(&jane, "Visible", 10.0).await;
    let visible_id = body["data"]["id"].as_str().unwrap().to_string();
    let (_, body) = app.create_package(&jane, "Hidden", 10.0).await;
    let hidden_id = body["data"]["id"].as_str().unwrap().to_string();
    app.send("PUT", &format!("/api/packages/{}", hidden_id), Some(&jane.token), Some(json!({ "isActive": false }))).await;

    let (status, body) = app.send("GET", &format!("/api/packages/photographer/{}", jane.user_id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["id"], visible_id.as_str());

    let (_, body) = app.send("GET", "/api/packages", Some(&jane.token), None).await;
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn test_package_validation() {
    let app = TestApp::new().await;
    let jane = app.register("Jane", "jane@example.com", "photographer").await;

    let (status, body) = app.send("POST", "/api/packages", Some(&jane.token), Some(json!({
        "name": "x".repeat(101),
        "description": "d",
        "price": 10.0,
        "duration": "1h",
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Name cannot be more than 100 characters");

    let (status, _) = app.send("POST", "/api/packages", Some(&jane.token), Some(json!({
        "name": "Cheap",
        "description": "d",
        "price": -5.0,
        "duration": "1h",
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Malformed body
    let (status, body) = app.send("POST", "/api/packages", Some(&jane.token), Some(json!({ "name": "No price" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    assert_eq!(app.count_rows("SELECT COUNT(*) FROM packages WHERE photographer_id = ?", &jane.user_id).await, 0);
}
