mod common;

use axum::http::StatusCode;
use common::{Account, TestApp};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::task::JoinSet;

async fn create_portfolio(app: &TestApp, owner: &Account, title: &str, published: bool) -> String {
    let (status, body) = app.send("POST", "/api/portfolio", Some(&owner.token), Some(json!({
        "title": title,
        "description": "Selected work",
        "category": "portrait",
        "isPublished": published,
    }))).await;
    assert_eq!(status, StatusCode::CREATED, "body: {}", body);
    body["data"]["id"].as_str().unwrap().to_string()
}

fn featured_count(portfolio: &Value) -> usize {
    portfolio["images"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|img| img["isFeatured"] == true)
        .count()
}

#[tokio::test]
async fn test_first_uploaded_image_becomes_featured() {
    let app = TestApp::new().await;
    let jane = app.register("Jane", "jane@example.com", "photographer").await;
    let portfolio_id = create_portfolio(&app, &jane, "Portraits", true).await;
    let images_uri = format!("/api/portfolio/{}/images", portfolio_id);

    let (status, body) = app.send("POST", &images_uri, Some(&jane.token), Some(json!({
        "images": [
            { "url": "https://cdn.example.com/1.jpg", "caption": "Golden hour" },
            { "url": "https://cdn.example.com/2.jpg" },
        ]
    }))).await;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    let portfolio = &body["data"]["portfolio"];
    assert_eq!(body["data"]["uploaded"].as_array().unwrap().len(), 2);
    assert_eq!(portfolio["images"][0]["isFeatured"], true);
    assert_eq!(portfolio["images"][0]["caption"], "Golden hour");
    assert_eq!(featured_count(portfolio), 1);

    // A later upload keeps the existing featured image
    let (_, body) = app.send("POST", &images_uri, Some(&jane.token), Some(json!({
        "images": [{ "url": "https://cdn.example.com/3.jpg" }]
    }))).await;
    let portfolio = &body["data"]["portfolio"];
    assert_eq!(portfolio["images"].as_array().unwrap().len(), 3);
    assert_eq!(portfolio["images"][0]["isFeatured"], true);
    assert_eq!(featured_count(portfolio), 1);
}

#[tokio::test]
async fn test_deleting_the_featured_image_promotes_the_next_one() {
    let app = TestApp::new().await;
    let jane = app.register("Jane", "jane@example.com", "photographer").await;
    let portfolio_id = create_portfolio(&app, &jane, "Portraits", true).await;

    let (_, body) = app.send("POST", &format!("/api/portfolio/{}/images", portfolio_id), Some(&jane.token), Some(json!({
        "images": [
            { "url": "https://cdn.example.com/1.jpg" },
            { "url": "https://cdn.example.com/2.jpg" },
        ]
    }))).await;
    let first_id = body["data"]["portfolio"]["images"][0]["id"].as_str().unwrap().to_string();
    let second_id = body["data"]["portfolio"]["images"][1]["id"].as_str().unwrap().to_string();

    let (status, body) = app.send("DELETE", &format!("/api/portfolio/{}/images/{}", portfolio_id, first_id), Some(&jane.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["images"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["images"][0]["id"], second_id.as_str());
    assert_eq!(body["data"]["images"][0]["isFeatured"], true);

    let (status, body) = app.send("DELETE", &format!("/api/portfolio/{}/images/{}", portfolio_id, first_id), Some(&jane.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Image not found in portfolio");

    let (status, body) = app.send("DELETE", &format!("/api/portfolio/{}/images/{}", portfolio_id, second_id), Some(&jane.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["images"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_image_upload_limits() {
    let app = TestApp::new().await;
    let jane = app.register("Jane", "jane@example.com", "photographer").await;
    let portfolio_id = create_portfolio(&app, &jane, "Portraits", true).await;
    let images_uri = format!("/api/portfolio/{}/images", portfolio_id);

    let (status, body) = app.send("POST", &images_uri, Some(&jane.token), Some(json!({ "images": [] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please upload at least one image");

    let eleven: Vec<Value> = (0..11).map(|i| json!({ "url": format!("https://cdn.example.com/{}.jpg", i) })).collect();
    let (status, _) = app.send("POST", &images_uri, Some(&jane.token), Some(json!({ "images": eleven }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.send("POST", "/api/portfolio/does-not-exist/images", Some(&jane.token), Some(json!({
        "images": [{ "url": "https://cdn.example.com/1.jpg" }]
    }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_public_listing_shows_only_published_portfolios() {
    let app = TestApp::new().await;
    let jane = app.register("Jane", "jane@example.com", "photographer").await;
    let published = create_portfolio(&app, &jane, "Public work", true).await;
    let draft = create_portfolio(&app, &jane, "Draft", false).await;

    let (status, body) = app.send("GET", &format!("/api/portfolio/photographer/{}", jane.user_id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["id"], published.as_str());

    let (_, body) = app.send("GET", "/api/portfolio", Some(&jane.token), None).await;
    assert_eq!(body["count"], 2);

    // Publishing the draft makes it visible
    let (status, body) = app.send("PUT", &format!("/api/portfolio/{}", draft), Some(&jane.token), Some(json!({ "isPublished": true }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isPublished"], true);

    let (_, body) = app.send("GET", &format!("/api/portfolio/photographer/{}", jane.user_id), None, None).await;
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn test_portfolio_category_must_be_known() {
    let app = TestApp::new().await;
    let jane = app.register("Jane", "jane@example.com", "photographer").await;

    let (status, body) = app.send("POST", "/api/portfolio", Some(&jane.token), Some(json!({
        "title": "Underwater",
        "category": "underwater",
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_uploads_to_one_portfolio_are_all_kept() {
    let app = Arc::new(TestApp::new().await);
    let jane = app.register("Jane", "jane@example.com", "photographer").await;
    let portfolio_id = create_portfolio(&app, &jane, "Weddings", true).await;
    let images_uri = Arc::new(format!("/api/portfolio/{}/images", portfolio_id));
    let token = Arc::new(jane.token);

    let mut set = JoinSet::new();
    for n in 0..8 {
        let app = app.clone();
        let token = token.clone();
        let images_uri = images_uri.clone();
        set.spawn(async move {
            app.send("POST", images_uri.as_str(), Some(token.as_str()), Some(json!({
                "images": [{ "url": format!("https://cdn.example.com/{}.jpg", n) }]
            }))).await
        });
    }
    while let Some(joined) = set.join_next().await {
        let (status, body) = joined.unwrap();
        assert_eq!(status, StatusCode::OK, "body: {}", body);
    }

    let (status, body) = app.send("GET", "/api/portfolio", Some(token.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    let portfolio = &body["data"][0];
    assert_eq!(portfolio["images"].as_array().unwrap().len(), 8);
    assert_eq!(featured_count(portfolio), 1);
}
