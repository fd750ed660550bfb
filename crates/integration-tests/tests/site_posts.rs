//! Integration tests for the post CRUD lifecycle.

use axum::http::StatusCode;
use inkcap_core::PostId;
use inkcap_integration_tests::{TestApp, TestClient, body_text, location};
use inkcap_site::db::PostRepository;

async fn admin_client(app: &TestApp) -> TestClient {
    let mut client = app.client();
    let response = client
        .register("Site Owner", "owner@example.com", "a decent password")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    client
}

fn sample_post(title: &str) -> Vec<(&'static str, String)> {
    vec![
        ("title", title.to_owned()),
        ("subtitle", "A subtitle".to_owned()),
        ("img_url", "https://example.com/header.jpg".to_owned()),
        ("body", "<p>Hello from the garden.</p>".to_owned()),
    ]
}

#[tokio::test]
async fn create_and_view_post() {
    let app = TestApp::new().await;
    let mut admin = admin_client(&app).await;

    let response = admin
        .post_form("/new-post", &sample_post("The Life of Cactus"))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let home = body_text(admin.get("/").await).await;
    assert!(home.contains("The Life of Cactus"));
    assert!(home.contains("Posted by Site Owner"));

    let post = body_text(admin.get("/show-post/1").await).await;
    assert!(post.contains("The Life of Cactus"));
    // The body is stored as HTML and rendered unescaped.
    assert!(post.contains("<p>Hello from the garden.</p>"));
}

#[tokio::test]
async fn missing_post_returns_not_found() {
    let app = TestApp::new().await;
    let mut client = app.client();

    let response = client.get("/show-post/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_title_rerenders_form_with_error() {
    let app = TestApp::new().await;
    let mut admin = admin_client(&app).await;

    admin
        .post_form("/new-post", &sample_post("The Life of Cactus"))
        .await;

    let response = admin
        .post_form("/new-post", &sample_post("The Life of Cactus"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("A post with this title already exists."));
    // The submitted values survive the round trip.
    assert!(html.contains("The Life of Cactus"));

    let count = PostRepository::new(&app.pool).count().await.expect("count");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn edit_rewrites_fields_but_not_the_date() {
    let app = TestApp::new().await;
    let mut admin = admin_client(&app).await;

    admin
        .post_form("/new-post", &sample_post("First Draft"))
        .await;

    let posts = PostRepository::new(&app.pool);
    let before = posts
        .get(PostId::new(1))
        .await
        .expect("query")
        .expect("post exists");

    let response = admin
        .post_form("/edit-post/1", &sample_post("Second Draft"))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/show-post/1");

    let after = posts
        .get(PostId::new(1))
        .await
        .expect("query")
        .expect("post exists");
    assert_eq!(after.title, "Second Draft");
    assert_eq!(after.date, before.date);
    assert_eq!(after.author_id, before.author_id);
}

#[tokio::test]
async fn edit_form_is_prefilled() {
    let app = TestApp::new().await;
    let mut admin = admin_client(&app).await;

    admin
        .post_form("/new-post", &sample_post("The Life of Cactus"))
        .await;

    let response = admin.get("/edit-post/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("The Life of Cactus"));
    assert!(html.contains("A subtitle"));
}

#[tokio::test]
async fn editing_a_missing_post_returns_not_found() {
    let app = TestApp::new().await;
    let mut admin = admin_client(&app).await;

    let response = admin
        .post_form("/edit-post/999", &sample_post("Ghost"))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_the_post() {
    let app = TestApp::new().await;
    let mut admin = admin_client(&app).await;

    admin
        .post_form("/new-post", &sample_post("Short Lived"))
        .await;

    let empty: [(&str, &str); 0] = [];
    let response = admin.post_form("/delete-post/1", &empty).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let gone = admin.get("/show-post/1").await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    // Deleting again is a miss, not a surprise.
    let response = admin.post_form("/delete-post/1", &empty).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_title_rerenders_form() {
    let app = TestApp::new().await;
    let mut admin = admin_client(&app).await;

    let mut form = sample_post("");
    form[0] = ("title", "   ".to_owned());
    let response = admin.post_form("/new-post", &form).await;
    assert_eq!(response.status(), StatusCode::OK);

    let count = PostRepository::new(&app.pool).count().await.expect("count");
    assert_eq!(count, 0);
}
