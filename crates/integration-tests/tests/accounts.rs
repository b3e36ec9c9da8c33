//! Signup, login, logout and page gating.

#![allow(clippy::unwrap_used)]

use bookrent_integration_tests::{TestApp, location};
use reqwest::StatusCode;

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::spawn().await;
    let browser = app.browser();

    assert_eq!(browser.page("/health").await, "ok");
    assert_eq!(browser.get("/health/ready").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_anonymous_pages_render() {
    let app = TestApp::spawn().await;
    let browser = app.browser();

    let home = browser.page("/").await;
    assert!(home.contains(r#"action="/booksearch""#));
    assert!(home.contains(r#"name="searchTerm""#));
    assert!(browser.page("/login").await.contains(r#"action="/login""#));
    assert!(browser.page("/signup").await.contains(r#"action="/signup""#));
}

#[tokio::test]
async fn test_signup_login_dashboard() {
    let app = TestApp::spawn().await;
    let browser = app.browser();

    browser
        .signup_and_login("Ada Lovelace", "ada@example.com", "analytical")
        .await;

    let dashboard = browser.page("/dashboard").await;
    assert!(dashboard.contains("Ada Lovelace"));
    assert!(dashboard.contains("ada@example.com"));

    let stored = app.stored_user("ada@example.com").await;
    assert_eq!(stored.name, "Ada Lovelace");
    assert_ne!(stored.password_hash, "analytical");
    assert!(stored.wishlist.is_empty());
    assert!(stored.rented_books.is_empty());
    assert_eq!(stored.total_cost, 0);
}

#[tokio::test]
async fn test_duplicate_signup_is_rejected() {
    let app = TestApp::spawn().await;
    let browser = app.browser();

    browser.signup("Ada", "ada@example.com", "first").await;
    let resp = browser.signup("Imposter", "ada@example.com", "second").await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.text().await.unwrap(), "User already exists");
    assert_eq!(app.users.len().await, 1);
    assert_eq!(app.stored_user("ada@example.com").await.name, "Ada");
}

#[tokio::test]
async fn test_signup_rejects_bad_input() {
    let app = TestApp::spawn().await;
    let browser = app.browser();

    let resp = browser.signup("Ada", "not-an-email", "pw").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.text().await.unwrap(), "Invalid email address");

    let resp = browser.signup("   ", "ada@example.com", "pw").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.text().await.unwrap(), "Missing name");

    assert!(app.users.is_empty().await);
}

#[tokio::test]
async fn test_login_failures() {
    let app = TestApp::spawn().await;
    let browser = app.browser();
    browser.signup("Ada", "ada@example.com", "analytical").await;

    let resp = browser.login("ada@example.com", "wrong").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.text().await.unwrap(), "Invalid password or user");

    let resp = browser.login("nobody@example.com", "analytical").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.text().await.unwrap(), "User not found");

    // Neither attempt logged the visitor in.
    assert_eq!(location(&browser.get("/dashboard").await), "/login");
}

#[tokio::test]
async fn test_protected_pages_redirect_to_login() {
    let app = TestApp::spawn().await;
    let browser = app.browser();

    for path in ["/books", "/dashboard", "/wishlist", "/rent"] {
        assert_eq!(location(&browser.get(path).await), "/login", "GET {path}");
    }
    for path in ["/add-to-wishlist", "/delete-from-wishlist", "/rent-book"] {
        assert_eq!(location(&browser.post(path, &[]).await), "/login", "POST {path}");
    }
}

#[tokio::test]
async fn test_save_actions_answer_unauthorized() {
    let app = TestApp::spawn().await;
    let browser = app.browser();

    for path in ["/save-wishlist", "/save-rented-books"] {
        let resp = browser.post(path, &[]).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "POST {path}");
        assert_eq!(resp.text().await.unwrap(), "Unauthorized");
    }
}

#[tokio::test]
async fn test_logout_ends_the_session() {
    let app = TestApp::spawn().await;
    let browser = app.browser();
    browser
        .signup_and_login("Ada", "ada@example.com", "analytical")
        .await;
    assert!(browser.page("/books").await.contains("Log out"));

    assert_eq!(location(&browser.get("/logout").await), "/login");

    assert_eq!(location(&browser.get("/dashboard").await), "/login");
    assert!(!browser.page("/").await.contains("Log out"));
}

#[tokio::test]
async fn test_sessions_are_per_visitor() {
    let app = TestApp::spawn().await;
    let ada = app.browser();
    let stranger = app.browser();

    ada.signup_and_login("Ada", "ada@example.com", "analytical")
        .await;

    assert_eq!(ada.get("/dashboard").await.status(), StatusCode::OK);
    assert_eq!(location(&stranger.get("/dashboard").await), "/login");
}
