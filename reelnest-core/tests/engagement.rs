//! Like and favorite rules, including the publication gate.

use anyhow::Result;
use reelnest_core::domain::RelationError;
use reelnest_model::{AccountID, EngagementKind, VideoID};

#[path = "support/mod.rs"]
mod support;

use support::TestWorld;

async fn likers(world: &TestWorld, video: VideoID) -> Result<Vec<AccountID>> {
    let video = world.videos.find(video).await?;
    Ok(video.liked_by.iter().map(|summary| summary.id).collect())
}

#[tokio::test]
async fn unpublished_video_rejects_engagement() -> Result<()> {
    let world = TestWorld::in_memory();
    let owner = world.account("owner").await?;
    let fan = world.account("fan").await?;
    let draft = world.draft_video(owner).await?;

    for kind in EngagementKind::ALL {
        let err = world
            .engagement
            .add_engagement(fan, draft, kind)
            .await
            .unwrap_err();
        assert!(err.is_conflict(), "{kind}: {err}");
    }

    let err = world.engagement.like(fan, draft).await.unwrap_err();
    assert_eq!(err.to_string(), "The video you're trying to like isn't published");
    let video = world.videos.find(draft).await?;
    assert!(video.liked_by.is_empty());
    assert!(video.favorited_by.is_empty());
    Ok(())
}

#[tokio::test]
async fn add_and_remove_cycle_on_published_video() -> Result<()> {
    let world = TestWorld::in_memory();
    let owner = world.account("owner").await?;
    let fan = world.account("fan").await?;
    let video = world.published_video(owner).await?;

    for kind in EngagementKind::ALL {
        let added = world.engagement.add_engagement(fan, video, kind).await?;
        assert!(added.is_engaged_by(kind, fan));

        let err = world
            .engagement
            .add_engagement(fan, video, kind)
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        let removed = world.engagement.remove_engagement(fan, video, kind).await?;
        assert!(!removed.is_engaged_by(kind, fan));

        let err = world
            .engagement
            .remove_engagement(fan, video, kind)
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }
    Ok(())
}

#[tokio::test]
async fn like_and_favorite_are_independent() -> Result<()> {
    let world = TestWorld::in_memory();
    let owner = world.account("owner").await?;
    let fan = world.account("fan").await?;
    let video = world.published_video(owner).await?;

    world.engagement.like(fan, video).await?;
    let favorited = world.engagement.add_to_favorites(fan, video).await?;
    assert!(favorited.is_engaged_by(EngagementKind::Like, fan));
    assert!(favorited.is_engaged_by(EngagementKind::Favorite, fan));

    let disliked = world.engagement.dislike(fan, video).await?;
    assert!(!disliked.is_engaged_by(EngagementKind::Like, fan));
    assert!(disliked.is_engaged_by(EngagementKind::Favorite, fan));

    let fan_view = world.accounts.find(fan).await?;
    assert!(fan_view.likes.is_empty());
    assert_eq!(fan_view.favorite_videos.len(), 1);
    assert_eq!(fan_view.favorite_videos[0].id, video);
    Ok(())
}

#[tokio::test]
async fn publication_gates_engagement_in_both_directions() -> Result<()> {
    let world = TestWorld::in_memory();
    let owner = world.account("owner").await?;
    let fan = world.account("fan").await?;
    let video = world.draft_video(owner).await?;

    let err = world.engagement.like(fan, video).await.unwrap_err();
    assert!(err.is_conflict());

    world.publication.publish(video, owner).await?;
    world.engagement.like(fan, video).await?;
    assert_eq!(likers(&world, video).await?, vec![fan]);

    world.publication.unpublish(video, owner).await?;
    let err = world.engagement.dislike(fan, video).await.unwrap_err();
    assert!(matches!(
        &err,
        RelationError::Conflict(m) if m == "The video you're trying to dislike isn't published"
    ));
    assert_eq!(likers(&world, video).await?, vec![fan]);
    Ok(())
}

#[tokio::test]
async fn engagement_state_is_reported_before_visibility() -> Result<()> {
    let world = TestWorld::in_memory();
    let owner = world.account("owner").await?;
    let fan = world.account("fan").await?;
    let video = world.published_video(owner).await?;

    world.engagement.add_to_favorites(fan, video).await?;
    world.publication.unpublish(video, owner).await?;

    let err = world.engagement.add_to_favorites(fan, video).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("User: {fan} has already added video: {video} to favorites")
    );
    Ok(())
}

#[tokio::test]
async fn missing_video_is_not_found() -> Result<()> {
    let world = TestWorld::in_memory();
    let fan = world.account("fan").await?;
    let ghost = VideoID::new();

    let err = world.engagement.like(fan, ghost).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), format!("Video with id: {ghost} not found"));
    Ok(())
}

#[tokio::test]
async fn concurrent_likes_store_exactly_one_edge() -> Result<()> {
    let world = TestWorld::in_memory();
    let owner = world.account("owner").await?;
    let fan = world.account("fan").await?;
    let video = world.published_video(owner).await?;

    let attempts = futures::future::join_all(
        (0..8).map(|_| world.engagement.like(fan, video)),
    )
    .await;

    assert_eq!(attempts.iter().filter(|result| result.is_ok()).count(), 1);
    assert_eq!(likers(&world, video).await?, vec![fan]);
    Ok(())
}
