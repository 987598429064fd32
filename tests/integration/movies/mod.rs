//! Movie catalog integration tests: search, sort, paging and admin writes

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{titles, TestApp};

async fn seeded_app() -> TestApp {
    let app = TestApp::new().unwrap();
    app.movie(json!({
        "title": "The Matrix", "fullTitle": "The Matrix (1999)", "rating": 8.7,
        "year": 1999, "rank": 16, "crew": "Lana Wachowski (dir.), Keanu Reeves"
    }))
    .await;
    app.movie(json!({
        "title": "The Matrix Reloaded", "fullTitle": "The Matrix Reloaded (2003)",
        "rating": 7.2, "year": 2003, "crew": "Lana Wachowski (dir.)"
    }))
    .await;
    app.movie(json!({
        "title": "Inception", "fullTitle": "Inception (2010)", "rating": 8.8,
        "year": 2010, "rank": 13, "crew": "Christopher Nolan (dir.)"
    }))
    .await;
    app
}

mod test_list {
    use super::*;

    #[tokio::test]
    async fn test_unfiltered_list_keeps_insertion_order() {
        let app = seeded_app().await;
        let response = app.get("/movies").await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            titles(&response.body),
            vec!["The Matrix", "The Matrix Reloaded", "Inception"]
        );
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_over_searchable_fields() {
        let app = seeded_app().await;

        let response = app.get("/movies?q=matrix").await;
        assert_eq!(
            titles(&response.body),
            vec!["The Matrix", "The Matrix Reloaded"]
        );

        let response = app.get("/movies?q=NOLAN").await;
        assert_eq!(titles(&response.body), vec!["Inception"]);

        let response = app.get("/movies?q=nothing-like-this").await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sort_defaults_to_descending() {
        let app = seeded_app().await;

        let response = app.get("/movies?sortBy=rating").await;
        assert_eq!(
            titles(&response.body),
            vec!["Inception", "The Matrix", "The Matrix Reloaded"]
        );

        let response = app.get("/movies?sortBy=rating&order=asc").await;
        assert_eq!(
            titles(&response.body),
            vec!["The Matrix Reloaded", "The Matrix", "Inception"]
        );
    }

    #[tokio::test]
    async fn test_missing_sort_values_go_last() {
        let app = seeded_app().await;

        for order in ["asc", "desc"] {
            let response = app.get(&format!("/movies?sortBy=rank&order={}", order)).await;
            assert_eq!(titles(&response.body)[2], "The Matrix Reloaded");
        }
    }

    #[tokio::test]
    async fn test_search_and_sort_combine() {
        let app = seeded_app().await;
        let response = app.get("/movies?q=matrix&sortBy=year&order=desc").await;
        assert_eq!(
            titles(&response.body),
            vec!["The Matrix Reloaded", "The Matrix"]
        );
    }

    #[tokio::test]
    async fn test_sort_field_outside_allow_list() {
        let app = seeded_app().await;

        for field in ["imdbId", "crew", "password"] {
            let response = app.get(&format!("/movies?sortBy={}", field)).await;
            assert_eq!(response.status, StatusCode::BAD_REQUEST);
            assert_eq!(response.body["message"], "Invalid sort field");
        }
    }

    #[tokio::test]
    async fn test_padded_sort_field_is_not_normalised() {
        let app = seeded_app().await;

        for sort_by in ["%20rating%20", "rating%20", "%20%20%20"] {
            let response = app.get(&format!("/movies?sortBy={}", sort_by)).await;
            assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", sort_by);
            assert_eq!(response.body["message"], "Invalid sort field");
        }
    }

    #[tokio::test]
    async fn test_search_text_is_used_verbatim() {
        let app = seeded_app().await;
        app.movie(json!({"title": "Matrix", "rating": 5.0})).await;

        let response = app.get("/movies?q=%20matrix").await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(!titles(&response.body).contains(&"Matrix".to_string()));
        assert!(titles(&response.body).contains(&"The Matrix".to_string()));
    }

    #[tokio::test]
    async fn test_order_without_sort_field_is_ignored() {
        let app = seeded_app().await;
        let response = app.get("/movies?order=asc").await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(titles(&response.body)[0], "The Matrix");
    }

    #[tokio::test]
    async fn test_routes_are_mounted_under_api() {
        let app = seeded_app().await;
        let response = app.get("/api/movies?q=inception").await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(titles(&response.body), vec!["Inception"]);
    }
}

mod test_pagination {
    use super::*;

    async fn numbered_app(count: usize) -> TestApp {
        let app = TestApp::new().unwrap();
        for n in 1..=count {
            app.movie(json!({"title": format!("Movie {:02}", n), "rating": 5.0}))
                .await;
        }
        app
    }

    #[tokio::test]
    async fn test_pages_slice_the_ordered_result() {
        let app = numbered_app(23).await;

        let page = |n: usize| {
            let app = &app;
            async move { titles(&app.get(&format!("/movies?page={}&pageSize=10", n)).await.body) }
        };

        let first = page(1).await;
        assert_eq!(first.len(), 10);
        assert_eq!(first[0], "Movie 01");
        assert_eq!(first[9], "Movie 10");

        assert_eq!(page(3).await, vec!["Movie 21", "Movie 22", "Movie 23"]);
        assert!(page(4).await.is_empty());
    }

    #[tokio::test]
    async fn test_page_below_one_is_first_page() {
        let app = numbered_app(12).await;
        let response = app.get("/movies?page=0&pageSize=5").await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(titles(&response.body)[0], "Movie 01");
    }

    #[tokio::test]
    async fn test_page_without_size_uses_default() {
        let app = numbered_app(23).await;
        let response = app.get("/movies?page=2").await;
        let titles = titles(&response.body);
        assert_eq!(titles.len(), 10);
        assert_eq!(titles[0], "Movie 11");
    }

    #[tokio::test]
    async fn test_invalid_page_parameter() {
        let app = numbered_app(1).await;
        let response = app.get("/movies?page=two").await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }
}

mod test_writes {
    use super::*;

    #[tokio::test]
    async fn test_writes_require_authentication() {
        let app = seeded_app().await;
        let movie = app.movie(json!({"title": "Target", "rating": 1})).await;
        let uri = format!("/movies/{}", movie.id);

        let cases = [
            (Method::POST, "/movies".to_string(), Some(json!({"title": "X", "rating": 1}))),
            (Method::PUT, uri.clone(), Some(json!({"rating": 2}))),
            (Method::DELETE, uri, None),
        ];
        for (method, uri, body) in cases {
            let response = app.send(method.clone(), &uri, None, body).await;
            assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        }
    }

    #[tokio::test]
    async fn test_writes_forbidden_for_non_admin() {
        let app = seeded_app().await;
        let user = app.user(None).await;
        let movie = app.movie(json!({"title": "Target", "rating": 1})).await;
        let uri = format!("/movies/{}", movie.id);

        let cases = [
            (Method::POST, "/movies".to_string(), Some(json!({"title": "X", "rating": 1}))),
            (Method::PUT, uri.clone(), Some(json!({"rating": 2}))),
            (Method::DELETE, uri, None),
        ];
        for (method, uri, body) in cases {
            let response = app.send(method.clone(), &uri, Some(&user.token), body).await;
            assert_eq!(response.status, StatusCode::FORBIDDEN, "{} {}", method, uri);
            assert_eq!(response.body["message"], "Admin access denied");
        }
    }

    #[tokio::test]
    async fn test_admin_crud_cycle() {
        let app = TestApp::new().unwrap();
        let admin = app.admin().await;

        let created = app
            .send(
                Method::POST,
                "/movies",
                Some(&admin.token),
                Some(json!({"title": "Heat", "rating": 8.3, "year": 1995, "id": "ignored"})),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED);
        let id = created.body["id"].as_str().unwrap().to_string();
        assert_ne!(id, "ignored");

        let updated = app
            .send(
                Method::PUT,
                &format!("/movies/{}", id),
                Some(&admin.token),
                Some(json!({"rating": 8.4})),
            )
            .await;
        assert_eq!(updated.status, StatusCode::OK);
        assert_eq!(updated.body["rating"], 8.4);
        assert_eq!(updated.body["year"], 1995);

        let fetched = app.get(&format!("/movies/{}", id)).await;
        assert_eq!(fetched.status, StatusCode::OK);
        assert_eq!(fetched.body["rating"], 8.4);

        let deleted = app
            .send(Method::DELETE, &format!("/movies/{}", id), Some(&admin.token), None)
            .await;
        assert_eq!(deleted.status, StatusCode::OK);
        assert_eq!(deleted.body["message"], "Movie deleted successfully");

        let gone = app.get(&format!("/movies/{}", id)).await;
        assert_eq!(gone.status, StatusCode::NOT_FOUND);
        assert_eq!(gone.body["message"], "Movie not found");
    }

    #[tokio::test]
    async fn test_admin_writes_to_missing_movie() {
        let app = TestApp::new().unwrap();
        let admin = app.admin().await;
        let uri = format!("/movies/{}", uuid::Uuid::new_v4());

        let response = app
            .send(Method::PUT, &uri, Some(&admin.token), Some(json!({"rating": 1})))
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);

        let response = app.send(Method::DELETE, &uri, Some(&admin.token), None).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_movie() {
        let app = TestApp::new().unwrap();
        let admin = app.admin().await;

        for body in [json!({"rating": 5}), json!({"title": "X"}), json!([1, 2])] {
            let response = app
                .send(Method::POST, "/movies", Some(&admin.token), Some(body))
                .await;
            assert_eq!(response.status, StatusCode::BAD_REQUEST);
        }
    }
}
