//! End-to-end workflow: register, login, gated write, public read

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{titles, TestApp};

#[tokio::test]
async fn test_register_login_and_admin_gated_create() {
    let app = TestApp::new().unwrap();

    // Register and log in as a plain user
    let registered = app
        .register("Alice", "alice@example.com", "wonderland", None)
        .await;
    assert_eq!(registered.status, StatusCode::CREATED);

    let login = app.login("alice@example.com", "wonderland").await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["role"], "user");
    let user_token = login.body["token"].as_str().unwrap().to_string();

    let movie = json!({"title": "Arrival", "rating": 7.9, "year": 2016});

    // The user token is authenticated but not allowed to write
    let denied = app
        .send(Method::POST, "/movies", Some(&user_token), Some(movie.clone()))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.body["message"], "Admin access denied");
    assert!(app.get("/movies").await.body.as_array().unwrap().is_empty());

    // An admin token on the same call succeeds
    let admin = app.admin().await;
    let created = app
        .send(Method::POST, "/movies", Some(&admin.token), Some(movie))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    // The record is publicly visible
    let listed = app.get("/movies").await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(titles(&listed.body), vec!["Arrival"]);
    assert_eq!(listed.body[0]["id"], created.body["id"]);
}

#[tokio::test]
async fn test_api_prefix_mirrors_root_routes() {
    let app = TestApp::new().unwrap();

    let registered = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({"name": "Bob", "email": "bob@example.com", "password": "builder"})),
        )
        .await;
    assert_eq!(registered.status, StatusCode::CREATED);

    let login = app.login("bob@example.com", "builder").await;
    assert_eq!(login.status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_and_banner() {
    let app = TestApp::new().unwrap();

    let health = app.get("/health").await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body, json!("OK"));

    let banner = app.get("/").await;
    assert_eq!(banner.status, StatusCode::OK);
    assert!(banner.body.as_str().unwrap().starts_with("Cinedex API"));
}
