//! Integration tests for registration, login, and logout.

use axum::http::StatusCode;
use inkcap_integration_tests::{TestApp, body_text, location};

#[tokio::test]
async fn register_logs_in_and_redirects_home() {
    let app = TestApp::new().await;
    let mut client = app.client();

    let response = client
        .register("Alice", "alice@example.com", "a decent password")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    // The session is established: the nav now greets the user.
    let home = client.get("/").await;
    assert_eq!(home.status(), StatusCode::OK);
    let html = body_text(home).await;
    assert!(html.contains("Log Out (Alice)"));
}

#[tokio::test]
async fn register_with_existing_email_redirects_to_login() {
    let app = TestApp::new().await;

    let mut alice = app.client();
    alice
        .register("Alice", "alice@example.com", "a decent password")
        .await;

    let mut impostor = app.client();
    let response = impostor
        .register("Impostor", "alice@example.com", "another password")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?notice=registered");

    // The login page translates the notice code into a message.
    let page = impostor.get("/login?notice=registered").await;
    let html = body_text(page).await;
    assert!(html.contains("already signed up with that email"));
}

#[tokio::test]
async fn register_with_existing_name_shows_error() {
    let app = TestApp::new().await;

    app.client()
        .register("Alice", "alice@example.com", "a decent password")
        .await;

    let response = app
        .client()
        .register("Alice", "other@example.com", "another password")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/register?error=name_taken");
}

#[tokio::test]
async fn register_accepts_a_short_password() {
    let app = TestApp::new().await;

    let response = app.client().register("Alice", "a@x.com", "pw1").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn register_rejects_empty_password() {
    let app = TestApp::new().await;

    let response = app
        .client()
        .register("Alice", "alice@example.com", "")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/register?error=password");
}

#[tokio::test]
async fn unknown_message_codes_render_nothing() {
    let app = TestApp::new().await;
    let mut client = app.client();

    let page = client
        .get("/login?error=free%20coffee%20at%20evil.example")
        .await;
    assert_eq!(page.status(), StatusCode::OK);
    let html = body_text(page).await;
    assert!(!html.contains("free coffee"));

    let page = client.get("/register?error=click%20here").await;
    assert_eq!(page.status(), StatusCode::OK);
    let html = body_text(page).await;
    assert!(!html.contains("click here"));
}

#[tokio::test]
async fn email_is_case_insensitive_for_login() {
    let app = TestApp::new().await;

    app.client()
        .register("Alice", "Alice@Example.COM", "a decent password")
        .await;

    let mut client = app.client();
    let response = client.login("alice@example.com", "a decent password").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn login_with_wrong_password_fails() {
    let app = TestApp::new().await;

    app.client()
        .register("Alice", "alice@example.com", "a decent password")
        .await;

    let response = app
        .client()
        .login("alice@example.com", "wrong password")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?error=credentials");
}

#[tokio::test]
async fn login_with_unknown_email_fails_the_same_way() {
    let app = TestApp::new().await;

    let response = app
        .client()
        .login("nobody@example.com", "whatever password")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?error=credentials");
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = TestApp::new().await;
    let mut client = app.client();

    client
        .register("Alice", "alice@example.com", "a decent password")
        .await;

    let response = client.get("/logout").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let home = client.get("/").await;
    let html = body_text(home).await;
    assert!(html.contains("Log In"));
    assert!(!html.contains("Log Out (Alice)"));
}
