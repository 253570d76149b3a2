use std::{any::type_name_of_val, fmt, sync::Arc};

use reelnest_model::{
    AccountID, NewVideo, Video, VideoID, VideoPatch, VideoWithRelations,
};
use tracing::{info, instrument};

use crate::application::unit_of_work::AppUnitOfWork;
use crate::database::ports::videos::VideosRepository;
use crate::domain::error::RelationResult;
use crate::domain::publication::not_owned;
use crate::domain::relations::{RelationResolver, video_not_found};
use crate::domain::validation::{validate_new_video, validate_video_patch};

/// Video creation, listing and owner-only edits.
#[derive(Clone)]
pub struct VideoService {
    videos: Arc<dyn VideosRepository>,
    resolver: RelationResolver,
}

impl fmt::Debug for VideoService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoService")
            .field("videos", &type_name_of_val(self.videos.as_ref()))
            .finish()
    }
}

impl VideoService {
    pub fn new(unit_of_work: &AppUnitOfWork) -> Self {
        Self {
            videos: unit_of_work.videos.clone(),
            resolver: RelationResolver::new(unit_of_work),
        }
    }

    /// Create a draft video owned by `author`.
    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        input: NewVideo,
        author: AccountID,
    ) -> RelationResult<Video> {
        validate_new_video(&input)?;

        let video = Video {
            id: VideoID::new(),
            title: input.title.trim().to_string(),
            src: input.src,
            published: false,
            author_id: author,
        };
        self.videos.create_video(&video).await?;

        info!("created draft video {}", video.id);
        Ok(video)
    }

    /// `owned` lists every video the caller authored, drafts included.
    /// Otherwise only published videos are listed.
    pub async fn list(
        &self,
        acting: AccountID,
        owned: bool,
    ) -> RelationResult<Vec<Video>> {
        let videos = if owned {
            self.videos.list_by_author(acting).await?
        } else {
            self.videos.list_published().await?
        };
        Ok(videos)
    }

    pub async fn find(&self, id: VideoID) -> RelationResult<VideoWithRelations> {
        self.resolver.load_video_with_relations(id).await
    }

    #[instrument(skip(self, patch))]
    pub async fn update(
        &self,
        id: VideoID,
        patch: VideoPatch,
        acting: AccountID,
    ) -> RelationResult<Video> {
        let current = self
            .videos
            .get_video(id)
            .await?
            .ok_or_else(|| video_not_found(id))?;
        if !current.is_owned_by(acting) {
            return Err(not_owned(id));
        }
        validate_video_patch(&patch)?;

        let updated = self
            .videos
            .update_video(id, acting, &patch)
            .await?
            .ok_or_else(|| not_owned(id))?;

        info!("updated video {id}");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::ports::accounts::AccountsRepository;
    use crate::domain::error::RelationError;
    use reelnest_model::{Account, Role};

    async fn author(unit_of_work: &AppUnitOfWork) -> AccountID {
        let account = Account {
            id: AccountID::new(),
            email: format!("{}@example.com", AccountID::new()),
            name: "author".into(),
            role: Role::Student,
            photo: None,
        };
        unit_of_work
            .accounts
            .create_account_with_password(&account, "hash")
            .await
            .unwrap();
        account.id
    }

    fn funny_video() -> NewVideo {
        NewVideo {
            title: "Funny Video".into(),
            src: "https://youtu.be/-LFSpfxBcm4".into(),
        }
    }

    #[tokio::test]
    async fn new_videos_are_drafts() {
        let unit_of_work = AppUnitOfWork::in_memory();
        let service = VideoService::new(&unit_of_work);
        let owner = author(&unit_of_work).await;

        let video = service.create(funny_video(), owner).await.unwrap();
        assert!(!video.published);
        assert_eq!(video.author_id, owner);

        assert!(service.list(owner, false).await.unwrap().is_empty());
        assert_eq!(service.list(owner, true).await.unwrap(), vec![video]);
    }

    #[tokio::test]
    async fn invalid_src_is_rejected() {
        let unit_of_work = AppUnitOfWork::in_memory();
        let service = VideoService::new(&unit_of_work);
        let owner = author(&unit_of_work).await;

        let err = service
            .create(
                NewVideo {
                    title: "Funny Video".into(),
                    src: "not a url".into(),
                },
                owner,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RelationError::Validation(_)));
    }

    #[tokio::test]
    async fn only_the_owner_can_edit() {
        let unit_of_work = AppUnitOfWork::in_memory();
        let service = VideoService::new(&unit_of_work);
        let owner = author(&unit_of_work).await;
        let stranger = author(&unit_of_work).await;
        let video = service.create(funny_video(), owner).await.unwrap();

        let patch = VideoPatch {
            title: Some("Funny Video #3".into()),
            src: None,
        };
        let err = service
            .update(video.id, patch.clone(), stranger)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), format!("Video: {} not found.", video.id));

        let updated = service.update(video.id, patch, owner).await.unwrap();
        assert_eq!(updated.title, "Funny Video #3");
        assert_eq!(updated.src, video.src);
        assert!(!updated.published);
    }
}
