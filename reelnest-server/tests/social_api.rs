use axum::http::StatusCode;

mod common;

use common::{TestApp, ids};

#[tokio::test]
async fn follow_and_unfollow_through_the_api() {
    let app = TestApp::in_memory();
    let a = app.signup("a").await;
    let b = app.signup("b").await;
    let follow = format!("/api/v1/users/{}/follow", b.id);
    let unfollow = format!("/api/v1/users/{}/unfollow", b.id);

    let (status, body) = app.send("PATCH", &follow, Some(&a.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], b.id.to_string());
    assert_eq!(ids(&body["followed_by"]), vec![a.id.to_string()]);

    let (status, body) = app.send("PATCH", &follow, Some(&a.token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"]["message"],
        format!("User: {} is already following user: {}", a.id, b.id)
    );

    let (status, body) =
        app.send("PATCH", &unfollow, Some(&a.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(ids(&body["followed_by"]).is_empty());

    let (status, _) = app.send("PATCH", &unfollow, Some(&a.token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn self_follow_is_forbidden() {
    let app = TestApp::in_memory();
    let a = app.signup("a").await;

    for action in ["follow", "unfollow"] {
        let (status, body) = app
            .send(
                "PATCH",
                &format!("/api/v1/users/{}/{action}", a.id),
                Some(&a.token),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["message"], format!("You cannot {action} yourself."));
    }
}

#[tokio::test]
async fn unknown_and_malformed_targets() {
    let app = TestApp::in_memory();
    let a = app.signup("a").await;
    let ghost = reelnest_model::AccountID::new();

    let (status, body) = app
        .send(
            "PATCH",
            &format!("/api/v1/users/{ghost}/follow"),
            Some(&a.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"]["message"],
        format!("User with id: {ghost} not found.")
    );

    let (status, _) = app
        .send("GET", "/api/v1/users/42", Some(&a.token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn two_followers_show_up_on_the_target() {
    let app = TestApp::in_memory();
    let a = app.signup("a").await;
    let b = app.signup("b").await;
    let c = app.signup("c").await;
    let follow = format!("/api/v1/users/{}/follow", b.id);

    app.send("PATCH", &follow, Some(&a.token), None).await;
    app.send("PATCH", &follow, Some(&c.token), None).await;

    let (status, body) = app
        .send("GET", &format!("/api/v1/users/{}", b.id), Some(&a.token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let mut followers = ids(&body["followed_by"]);
    followers.sort();
    let mut expected = vec![a.id.to_string(), c.id.to_string()];
    expected.sort();
    assert_eq!(followers, expected);

    let (_, a_view) = app
        .send("GET", &format!("/api/v1/users/{}", a.id), Some(&a.token), None)
        .await;
    assert_eq!(ids(&a_view["following"]), vec![b.id.to_string()]);
}
