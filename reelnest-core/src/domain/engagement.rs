//! Like and favorite edges between accounts and videos.
//!
//! Both kinds share one policy. Checks run in a fixed order: the video must
//! exist, the edge must be in the expected state, and the video must be
//! published. Removal is gated on publication as well as addition.

use std::{any::type_name_of_val, fmt, sync::Arc};

use reelnest_model::{AccountID, EngagementKind, VideoID, VideoWithRelations};
use tracing::{info, instrument, warn};

use crate::application::unit_of_work::AppUnitOfWork;
use crate::database::ports::edges::{EdgeRef, EdgesRepository};
use crate::domain::error::{RelationError, RelationResult};
use crate::domain::relations::RelationResolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementAction {
    Add,
    Remove,
}

impl EngagementAction {
    /// Verb used in messages about `kind`.
    fn verb(self, kind: EngagementKind) -> &'static str {
        match (self, kind) {
            (EngagementAction::Add, EngagementKind::Like) => "like",
            (EngagementAction::Remove, EngagementKind::Like) => "dislike",
            (EngagementAction::Add, EngagementKind::Favorite) => {
                "add to favorites"
            }
            (EngagementAction::Remove, EngagementKind::Favorite) => {
                "remove from favorites"
            }
        }
    }

    fn state_conflict(
        self,
        kind: EngagementKind,
        account: AccountID,
        video: VideoID,
    ) -> RelationError {
        let message = match (self, kind) {
            (EngagementAction::Add, EngagementKind::Like) => {
                format!("User: {account} already likes video: {video}")
            }
            (EngagementAction::Remove, EngagementKind::Like) => {
                format!("User: {account} has not liked video: {video}")
            }
            (EngagementAction::Add, EngagementKind::Favorite) => format!(
                "User: {account} has already added video: {video} to favorites"
            ),
            (EngagementAction::Remove, EngagementKind::Favorite) => format!(
                "User: {account} hasn't added video: {video} to favorites"
            ),
        };
        RelationError::Conflict(message)
    }

    fn unpublished_conflict(self, kind: EngagementKind) -> RelationError {
        RelationError::Conflict(format!(
            "The video you're trying to {} isn't published",
            self.verb(kind)
        ))
    }
}

/// Validate `action` against a freshly resolved video.
fn check(
    video: &VideoWithRelations,
    account: AccountID,
    kind: EngagementKind,
    action: EngagementAction,
) -> RelationResult<()> {
    let engaged = video.is_engaged_by(kind, account);
    let expected = match action {
        EngagementAction::Add => !engaged,
        EngagementAction::Remove => engaged,
    };
    if !expected {
        return Err(action.state_conflict(kind, account, video.id()));
    }
    if !video.is_published() {
        return Err(action.unpublished_conflict(kind));
    }
    Ok(())
}

#[derive(Clone)]
pub struct EngagementService {
    resolver: RelationResolver,
    edges: Arc<dyn EdgesRepository>,
}

impl fmt::Debug for EngagementService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngagementService")
            .field("resolver", &self.resolver)
            .field("edges", &type_name_of_val(self.edges.as_ref()))
            .finish()
    }
}

impl EngagementService {
    pub fn new(unit_of_work: &AppUnitOfWork) -> Self {
        Self {
            resolver: RelationResolver::new(unit_of_work),
            edges: unit_of_work.edges.clone(),
        }
    }

    pub async fn like(
        &self,
        account: AccountID,
        video: VideoID,
    ) -> RelationResult<VideoWithRelations> {
        self.add_engagement(account, video, EngagementKind::Like)
            .await
    }

    pub async fn dislike(
        &self,
        account: AccountID,
        video: VideoID,
    ) -> RelationResult<VideoWithRelations> {
        self.remove_engagement(account, video, EngagementKind::Like)
            .await
    }

    pub async fn add_to_favorites(
        &self,
        account: AccountID,
        video: VideoID,
    ) -> RelationResult<VideoWithRelations> {
        self.add_engagement(account, video, EngagementKind::Favorite)
            .await
    }

    pub async fn remove_from_favorites(
        &self,
        account: AccountID,
        video: VideoID,
    ) -> RelationResult<VideoWithRelations> {
        self.remove_engagement(account, video, EngagementKind::Favorite)
            .await
    }

    pub async fn add_engagement(
        &self,
        account: AccountID,
        video: VideoID,
        kind: EngagementKind,
    ) -> RelationResult<VideoWithRelations> {
        self.apply(account, video, kind, EngagementAction::Add).await
    }

    pub async fn remove_engagement(
        &self,
        account: AccountID,
        video: VideoID,
        kind: EngagementKind,
    ) -> RelationResult<VideoWithRelations> {
        self.apply(account, video, kind, EngagementAction::Remove)
            .await
    }

    #[instrument(skip(self))]
    async fn apply(
        &self,
        account: AccountID,
        video: VideoID,
        kind: EngagementKind,
        action: EngagementAction,
    ) -> RelationResult<VideoWithRelations> {
        let current = self.resolver.load_video_with_relations(video).await?;
        check(&current, account, kind, action)?;

        let edge = EdgeRef::Engagement {
            account,
            video,
            kind,
        };
        let change = match action {
            EngagementAction::Add => self.edges.connect(edge).await?,
            EngagementAction::Remove => self.edges.disconnect(edge).await?,
        };

        if !change.is_applied() {
            warn!(%edge, "engagement write found changed state, re-checking");
            let latest = self.resolver.load_video_with_relations(video).await?;
            check(&latest, account, kind, action)?;
            // The state moved away and back before the re-read.
            return Err(action.state_conflict(kind, account, video));
        }

        info!(%edge, ?action, "engagement updated");
        self.resolver.load_video_with_relations(video).await
    }
}
