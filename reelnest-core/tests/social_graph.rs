//! Follow/unfollow rules against the in-memory store.

use anyhow::Result;
use reelnest_core::domain::RelationError;

#[path = "support/mod.rs"]
mod support;

use support::TestWorld;

#[tokio::test]
async fn self_follow_and_self_unfollow_are_forbidden() -> Result<()> {
    let world = TestWorld::in_memory();
    let a = world.account("a").await?;

    let err = world.social.follow(a, a).await.unwrap_err();
    assert!(matches!(&err, RelationError::Forbidden(m) if m == "You cannot follow yourself."));

    let err = world.social.unfollow(a, a).await.unwrap_err();
    assert!(matches!(&err, RelationError::Forbidden(m) if m == "You cannot unfollow yourself."));

    let a_view = world.accounts.find(a).await?;
    assert!(a_view.following.is_empty());
    assert!(a_view.followed_by.is_empty());
    Ok(())
}

#[tokio::test]
async fn repeated_follow_is_a_conflict_and_stores_one_edge() -> Result<()> {
    let world = TestWorld::in_memory();
    let a = world.account("a").await?;
    let b = world.account("b").await?;

    world.social.follow(a, b).await?;
    let err = world.social.follow(a, b).await.unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(err.to_string(), format!("User: {a} is already following user: {b}"));

    assert_eq!(world.followers_of(b).await?, vec![a]);
    let a_view = world.accounts.find(a).await?;
    assert_eq!(a_view.following.len(), 1);
    assert_eq!(a_view.following[0].id, b);
    Ok(())
}

#[tokio::test]
async fn unfollow_without_follow_is_a_conflict() -> Result<()> {
    let world = TestWorld::in_memory();
    let a = world.account("a").await?;
    let b = world.account("b").await?;

    let err = world.social.unfollow(a, b).await.unwrap_err();
    assert_eq!(err.to_string(), format!("User: {a} is not following user: {b}"));
    assert!(world.followers_of(b).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn follow_then_unfollow_restores_followers() -> Result<()> {
    let world = TestWorld::in_memory();
    let a = world.account("a").await?;
    let b = world.account("b").await?;
    let before = world.followers_of(b).await?;

    world.social.follow(a, b).await?;
    let target = world.social.unfollow(a, b).await?;
    assert!(!target.is_followed_by(a));
    assert_eq!(world.followers_of(b).await?, before);

    let err = world.social.unfollow(a, b).await.unwrap_err();
    assert!(err.is_conflict());
    Ok(())
}

#[tokio::test]
async fn two_followers_of_one_account() -> Result<()> {
    let world = TestWorld::in_memory();
    let a = world.account("a").await?;
    let b = world.account("b").await?;
    let c = world.account("c").await?;

    world.social.follow(a, b).await?;
    let target = world.social.follow(c, b).await?;

    let mut followers: Vec<_> =
        target.followed_by.iter().map(|summary| summary.id).collect();
    followers.sort();
    let mut expected = vec![a, c];
    expected.sort();
    assert_eq!(followers, expected);
    Ok(())
}

#[tokio::test]
async fn follow_edges_are_directed() -> Result<()> {
    let world = TestWorld::in_memory();
    let a = world.account("a").await?;
    let b = world.account("b").await?;

    world.social.follow(a, b).await?;
    world.social.follow(b, a).await?;
    world.social.unfollow(a, b).await?;

    assert!(world.followers_of(b).await?.is_empty());
    assert_eq!(world.followers_of(a).await?, vec![b]);
    Ok(())
}

#[tokio::test]
async fn concurrent_follows_store_exactly_one_edge() -> Result<()> {
    let world = TestWorld::in_memory();
    let a = world.account("a").await?;
    let b = world.account("b").await?;

    let attempts = futures::future::join_all(
        (0..8).map(|_| world.social.follow(a, b)),
    )
    .await;

    let succeeded = attempts.iter().filter(|result| result.is_ok()).count();
    assert_eq!(succeeded, 1);
    assert!(
        attempts
            .iter()
            .filter_map(|result| result.as_ref().err())
            .all(RelationError::is_conflict)
    );
    assert_eq!(world.followers_of(b).await?, vec![a]);
    Ok(())
}
