use std::{any::type_name_of_val, fmt, sync::Arc};

use reelnest_model::{AccountID, AccountWithRelations, VideoID, VideoWithRelations};
use tracing::{debug, instrument};

use crate::application::unit_of_work::AppUnitOfWork;
use crate::database::ports::{
    accounts::AccountsRepository, videos::VideosRepository,
};
use crate::domain::error::{RelationError, RelationResult};

pub(crate) fn account_not_found(id: AccountID) -> RelationError {
    RelationError::NotFound(format!("User with id: {id} not found."))
}

pub(crate) fn video_not_found(id: VideoID) -> RelationError {
    RelationError::NotFound(format!("Video with id: {id} not found"))
}

/// Reads an account or video together with every relation set it takes part
/// in. Each call reflects the store at call time; nothing is cached.
#[derive(Clone)]
pub struct RelationResolver {
    accounts: Arc<dyn AccountsRepository>,
    videos: Arc<dyn VideosRepository>,
}

impl fmt::Debug for RelationResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationResolver")
            .field("accounts", &type_name_of_val(self.accounts.as_ref()))
            .field("videos", &type_name_of_val(self.videos.as_ref()))
            .finish()
    }
}

impl RelationResolver {
    pub fn new(unit_of_work: &AppUnitOfWork) -> Self {
        Self {
            accounts: unit_of_work.accounts.clone(),
            videos: unit_of_work.videos.clone(),
        }
    }

    #[instrument(skip(self))]
    pub async fn load_account_with_relations(
        &self,
        id: AccountID,
    ) -> RelationResult<AccountWithRelations> {
        let account = self
            .accounts
            .load_account_with_relations(id)
            .await?
            .ok_or_else(|| account_not_found(id))?;

        debug!(
            following = account.following.len(),
            followed_by = account.followed_by.len(),
            "resolved account relations"
        );
        Ok(account)
    }

    #[instrument(skip(self))]
    pub async fn load_video_with_relations(
        &self,
        id: VideoID,
    ) -> RelationResult<VideoWithRelations> {
        let video = self
            .videos
            .load_video_with_relations(id)
            .await?
            .ok_or_else(|| video_not_found(id))?;

        debug!(
            published = video.is_published(),
            liked_by = video.liked_by.len(),
            favorited_by = video.favorited_by.len(),
            "resolved video relations"
        );
        Ok(video)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelnest_model::{Account, Role, Video};

    #[tokio::test]
    async fn unknown_ids_are_not_found_with_their_messages() {
        let resolver = RelationResolver::new(&AppUnitOfWork::in_memory());
        let account = AccountID::new();
        let video = VideoID::new();

        let err = resolver
            .load_account_with_relations(account)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), format!("User with id: {account} not found."));

        let err = resolver.load_video_with_relations(video).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), format!("Video with id: {video} not found"));
    }

    #[tokio::test]
    async fn resolves_owned_videos_on_the_author() {
        let unit_of_work = AppUnitOfWork::in_memory();
        let author = Account {
            id: AccountID::new(),
            email: "john@example.com".into(),
            name: "john".into(),
            role: Role::Student,
            photo: None,
        };
        unit_of_work
            .accounts
            .create_account_with_password(&author, "hash")
            .await
            .unwrap();
        let video = Video {
            id: VideoID::new(),
            title: "Funny Video".into(),
            src: "https://youtu.be/-LFSpfxBcm4".into(),
            published: false,
            author_id: author.id,
        };
        unit_of_work.videos.create_video(&video).await.unwrap();

        let resolver = RelationResolver::new(&unit_of_work);
        let resolved = resolver
            .load_account_with_relations(author.id)
            .await
            .unwrap();
        assert_eq!(resolved.videos, vec![video.summary()]);
        assert!(resolved.following.is_empty());
        assert!(resolved.likes.is_empty());
    }
}
