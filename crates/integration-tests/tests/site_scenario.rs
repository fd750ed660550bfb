//! Full walkthrough: the first account publishes, a second account can
//! read but not touch anything, and deletion is final.

use axum::http::StatusCode;
use inkcap_core::PostId;
use inkcap_integration_tests::{TestApp, body_text, location};
use inkcap_site::db::PostRepository;

#[tokio::test]
async fn publish_edit_and_delete_walkthrough() {
    let app = TestApp::new().await;

    // Alice registers first and becomes the admin (id 1).
    let mut alice = app.client();
    let response = alice.register("Alice", "a@x.com", "pw1").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    // Alice publishes a post.
    let response = alice
        .post_form(
            "/new-post",
            &[
                ("title", "Hello"),
                ("subtitle", "Sub"),
                ("img_url", "http://img"),
                ("body", "body"),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let posts = PostRepository::new(&app.pool);
    let original = posts
        .get(PostId::new(1))
        .await
        .expect("query")
        .expect("post exists");
    assert_eq!(original.subtitle, "Sub");

    // Alice edits only the subtitle; the date stays put.
    let response = alice
        .post_form(
            "/edit-post/1",
            &[
                ("title", "Hello"),
                ("subtitle", "New Sub"),
                ("img_url", "http://img"),
                ("body", "body"),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let edited = posts
        .get(PostId::new(1))
        .await
        .expect("query")
        .expect("post exists");
    assert_eq!(edited.subtitle, "New Sub");
    assert_eq!(edited.title, "Hello");
    assert_eq!(edited.date, original.date);

    // Bob registers second (id 2) and may not delete Alice's post.
    let mut bob = app.client();
    bob.register("Bob", "b@x.com", "pw2").await;

    let empty: [(&str, &str); 0] = [];
    let response = bob.post_form("/delete-post/1", &empty).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(posts.get(PostId::new(1)).await.expect("query").is_some());

    // Bob can still read it.
    let html = body_text(bob.get("/show-post/1").await).await;
    assert!(html.contains("New Sub"));

    // Alice deletes it for good.
    let response = alice.post_form("/delete-post/1", &empty).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(posts.get(PostId::new(1)).await.expect("query").is_none());
}
