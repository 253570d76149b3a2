use std::{any::type_name_of_val, fmt, sync::Arc};

use reelnest_model::{AccountID, Video, VideoID};
use tracing::{info, instrument};

use crate::application::unit_of_work::AppUnitOfWork;
use crate::database::ports::videos::VideosRepository;
use crate::domain::error::{RelationError, RelationResult};
use crate::domain::relations::video_not_found;

/// Publication lifecycle of a video. New videos start as `Draft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublicationState {
    #[default]
    Draft,
    Published,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicationEvent {
    Publish,
    Unpublish,
}

impl PublicationState {
    pub fn of(video: &Video) -> Self {
        if video.published {
            PublicationState::Published
        } else {
            PublicationState::Draft
        }
    }

    pub fn is_published(self) -> bool {
        matches!(self, PublicationState::Published)
    }

    /// Both events are accepted in both states; re-applying the event for
    /// the current state leaves it unchanged.
    pub fn apply(self, event: PublicationEvent) -> Self {
        match event {
            PublicationEvent::Publish => PublicationState::Published,
            PublicationEvent::Unpublish => PublicationState::Draft,
        }
    }
}

pub(crate) fn not_owned(id: VideoID) -> RelationError {
    RelationError::NotFound(format!("Video: {id} not found."))
}

/// Owner-only publish/unpublish. Transitions never touch engagement edges.
#[derive(Clone)]
pub struct PublicationService {
    videos: Arc<dyn VideosRepository>,
}

impl fmt::Debug for PublicationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicationService")
            .field("videos", &type_name_of_val(self.videos.as_ref()))
            .finish()
    }
}

impl PublicationService {
    pub fn new(unit_of_work: &AppUnitOfWork) -> Self {
        Self {
            videos: unit_of_work.videos.clone(),
        }
    }

    pub async fn publish(
        &self,
        video: VideoID,
        acting: AccountID,
    ) -> RelationResult<Video> {
        self.transition(video, acting, PublicationEvent::Publish)
            .await
    }

    pub async fn unpublish(
        &self,
        video: VideoID,
        acting: AccountID,
    ) -> RelationResult<Video> {
        self.transition(video, acting, PublicationEvent::Unpublish)
            .await
    }

    #[instrument(skip(self))]
    pub async fn transition(
        &self,
        video: VideoID,
        acting: AccountID,
        event: PublicationEvent,
    ) -> RelationResult<Video> {
        let current = self
            .videos
            .get_video(video)
            .await?
            .ok_or_else(|| video_not_found(video))?;
        // Non-owners cannot tell a foreign video from a missing one.
        if !current.is_owned_by(acting) {
            return Err(not_owned(video));
        }

        let from = PublicationState::of(&current);
        let to = from.apply(event);
        let updated = self
            .videos
            .set_published(video, acting, to.is_published())
            .await?
            .ok_or_else(|| not_owned(video))?;

        info!(?from, ?to, "publication state applied");
        Ok(updated)
    }
}
