//! Registration, login and bearer token integration tests

use axum::http::{Method, StatusCode};
use cinedex_auth::{AuthConfig, Role, TokenIssuer};
use uuid::Uuid;

use crate::common::{TestApp, TEST_JWT_SECRET};

mod test_register {
    use super::*;

    #[tokio::test]
    async fn test_register_defaults_to_user_role() {
        let app = TestApp::new().unwrap();
        let response = app
            .register("Alice", "alice@example.com", "wonderland", None)
            .await;

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body["name"], "Alice");
        assert_eq!(response.body["email"], "alice@example.com");
        assert_eq!(response.body["role"], "user");
        assert!(response.body["id"].is_string());
        assert!(response.body["token"].is_string());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let app = TestApp::new().unwrap();
        app.register("Alice", "alice@example.com", "wonderland", None)
            .await;

        let response = app
            .register("Other Alice", "Alice@Example.com", "different", None)
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["message"], "User already exists");
    }

    #[tokio::test]
    async fn test_invalid_bodies_are_rejected() {
        let app = TestApp::new().unwrap();

        let cases = [
            ("", "a@example.com", "password"),
            ("Bob", "not-an-email", "password"),
            ("Bob", "b@example.com", "short"),
        ];
        for (name, email, password) in cases {
            let response = app.register(name, email, password, None).await;
            assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", email);
        }
    }
}

mod test_login {
    use super::*;

    #[tokio::test]
    async fn test_login_returns_token_and_role() {
        let app = TestApp::new().unwrap();
        let registered = app
            .register("Alice", "alice@example.com", "wonderland", None)
            .await;

        let response = app.login("alice@example.com", "wonderland").await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["id"], registered.body["id"]);
        assert_eq!(response.body["role"], "user");
        assert!(response.body["token"].is_string());
    }

    #[tokio::test]
    async fn test_bad_credentials_share_one_answer() {
        let app = TestApp::new().unwrap();
        app.register("Alice", "alice@example.com", "wonderland", None)
            .await;

        let wrong_password = app.login("alice@example.com", "looking-glass").await;
        let unknown_email = app.login("mallory@example.com", "wonderland").await;

        for response in [wrong_password, unknown_email] {
            assert_eq!(response.status, StatusCode::UNAUTHORIZED);
            assert_eq!(response.body["message"], "Invalid credentials");
        }
    }
}

mod test_bearer_token {
    use super::*;

    #[tokio::test]
    async fn test_me_returns_principal_without_secret() {
        let app = TestApp::new().unwrap();
        let user = app.user(None).await;

        let response = app
            .send(Method::GET, "/auth/me", Some(&user.token), None)
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["id"], user.id);
        assert_eq!(response.body["email"], user.email);
        assert!(response.body.get("password").is_none());
        assert!(response.body.get("secret_hash").is_none());
    }

    #[tokio::test]
    async fn test_missing_and_malformed_headers() {
        let app = TestApp::new().unwrap();

        let response = app.send(Method::GET, "/auth/me", None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body["message"], "Not authorized, no token");

        let response = app
            .send(Method::GET, "/auth/me", Some("not.a.jwt"), None)
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body["message"], "Not authorized, token failed");
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let app = TestApp::new().unwrap();
        let user = app.user(None).await;
        let id = Uuid::parse_str(&user.id).unwrap();

        let expired = TokenIssuer::new(
            AuthConfig::new(TEST_JWT_SECRET).with_ttl(chrono::Duration::seconds(-60)),
        )
        .issue(id, Role::User)
        .unwrap();

        let response = app
            .send(Method::GET, "/auth/me", Some(&expired.value), None)
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_from_other_secret_is_rejected() {
        let app = TestApp::new().unwrap();
        let user = app.user(None).await;
        let id = Uuid::parse_str(&user.id).unwrap();

        let forged = TokenIssuer::new(AuthConfig::new("some-other-secret"))
            .issue(id, Role::Admin)
            .unwrap();

        let response = app
            .send(Method::GET, "/auth/me", Some(&forged.value), None)
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_for_unknown_principal_is_rejected() {
        let app = TestApp::new().unwrap();
        let orphan = TokenIssuer::new(AuthConfig::new(TEST_JWT_SECRET))
            .issue(Uuid::new_v4(), Role::Admin)
            .unwrap();

        let response = app
            .send(Method::GET, "/auth/me", Some(&orphan.value), None)
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body["message"], "User not found");
    }
}
