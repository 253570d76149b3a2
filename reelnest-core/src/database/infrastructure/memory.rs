//! In-process entity store.
//!
//! Backs development runs (`--memory`) and the test suites. Every operation
//! takes the single state lock, so reads return a consistent snapshot and edge
//! writes are atomic check-and-set, matching what the Postgres adapter gets
//! from primary keys and guarded statements.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use async_trait::async_trait;
use reelnest_model::{
    Account, AccountID, AccountSummary, AccountWithRelations, EngagementKind,
    Video, VideoID, VideoPatch, VideoRef, VideoWithRelations,
};
use tokio::sync::RwLock;

use crate::database::ports::{
    accounts::AccountsRepository,
    edges::{EdgeChange, EdgeRef, EdgesRepository},
    videos::VideosRepository,
};
use crate::error::{Result, StoreError};

#[derive(Default)]
struct MemoryState {
    accounts: BTreeMap<AccountID, Account>,
    credentials: HashMap<AccountID, String>,
    emails: HashMap<String, AccountID>,
    videos: BTreeMap<VideoID, Video>,
    /// (follower, target)
    follows: BTreeSet<(AccountID, AccountID)>,
    /// (video, account)
    likes: BTreeSet<(VideoID, AccountID)>,
    favorites: BTreeSet<(VideoID, AccountID)>,
}

impl MemoryState {
    fn engagements(
        &self,
        kind: EngagementKind,
    ) -> &BTreeSet<(VideoID, AccountID)> {
        match kind {
            EngagementKind::Like => &self.likes,
            EngagementKind::Favorite => &self.favorites,
        }
    }

    fn engagements_mut(
        &mut self,
        kind: EngagementKind,
    ) -> &mut BTreeSet<(VideoID, AccountID)> {
        match kind {
            EngagementKind::Like => &mut self.likes,
            EngagementKind::Favorite => &mut self.favorites,
        }
    }

    fn account_summary(&self, id: AccountID) -> Option<AccountSummary> {
        self.accounts.get(&id).map(Account::summary)
    }

    fn require_account(&self, id: AccountID) -> Result<()> {
        if self.accounts.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::Internal(format!(
                "foreign key violation: account {id} does not exist"
            )))
        }
    }

    fn video_with_relations(&self, video: &Video) -> VideoWithRelations {
        let engaged = |kind: EngagementKind| -> Vec<AccountSummary> {
            self.engagements(kind)
                .iter()
                .filter(|(video_id, _)| *video_id == video.id)
                .filter_map(|(_, account)| self.account_summary(*account))
                .collect()
        };

        VideoWithRelations {
            video: video.clone(),
            liked_by: engaged(EngagementKind::Like),
            favorited_by: engaged(EngagementKind::Favorite),
        }
    }
}

/// Entity store held entirely in memory.
#[derive(Default)]
pub struct InMemoryEntityStore {
    state: RwLock<MemoryState>,
}

impl fmt::Debug for InMemoryEntityStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryEntityStore").finish_non_exhaustive()
    }
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountsRepository for InMemoryEntityStore {
    async fn create_account_with_password(
        &self,
        account: &Account,
        password_hash: &str,
    ) -> Result<()> {
        let mut state = self.state.write().await;

        if state.emails.contains_key(&account.email) {
            return Err(StoreError::UniqueViolation("accounts_email_key".into()));
        }
        if state.accounts.contains_key(&account.id) {
            return Err(StoreError::UniqueViolation("accounts_pkey".into()));
        }

        state.emails.insert(account.email.clone(), account.id);
        state
            .credentials
            .insert(account.id, password_hash.to_string());
        state.accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn get_account(&self, id: AccountID) -> Result<Option<Account>> {
        Ok(self.state.read().await.accounts.get(&id).cloned())
    }

    async fn get_account_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Account>> {
        let state = self.state.read().await;
        Ok(state
            .emails
            .get(email)
            .and_then(|id| state.accounts.get(id))
            .cloned())
    }

    async fn get_password_hash(&self, id: AccountID) -> Result<Option<String>> {
        Ok(self.state.read().await.credentials.get(&id).cloned())
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        Ok(self.state.read().await.accounts.values().cloned().collect())
    }

    async fn load_account_with_relations(
        &self,
        id: AccountID,
    ) -> Result<Option<AccountWithRelations>> {
        let state = self.state.read().await;
        let Some(account) = state.accounts.get(&id) else {
            return Ok(None);
        };

        let following = state
            .follows
            .iter()
            .filter(|(follower, _)| *follower == id)
            .filter_map(|(_, target)| state.account_summary(*target))
            .collect();
        let followed_by = state
            .follows
            .iter()
            .filter(|(_, target)| *target == id)
            .filter_map(|(follower, _)| state.account_summary(*follower))
            .collect();
        let videos = state
            .videos
            .values()
            .filter(|video| video.author_id == id)
            .map(Video::summary)
            .collect();
        let favorite_videos = state
            .favorites
            .iter()
            .filter(|(_, account)| *account == id)
            .filter_map(|(video, _)| state.videos.get(video))
            .map(Video::summary)
            .collect();
        let likes = state
            .likes
            .iter()
            .filter(|(_, account)| *account == id)
            .map(|(video, _)| VideoRef { id: *video })
            .collect();

        Ok(Some(AccountWithRelations {
            account: account.clone(),
            following,
            followed_by,
            videos,
            favorite_videos,
            likes,
        }))
    }
}

#[async_trait]
impl VideosRepository for InMemoryEntityStore {
    async fn create_video(&self, video: &Video) -> Result<()> {
        let mut state = self.state.write().await;
        state.require_account(video.author_id)?;
        if state.videos.contains_key(&video.id) {
            return Err(StoreError::UniqueViolation("videos_pkey".into()));
        }
        state.videos.insert(video.id, video.clone());
        Ok(())
    }

    async fn get_video(&self, id: VideoID) -> Result<Option<Video>> {
        Ok(self.state.read().await.videos.get(&id).cloned())
    }

    async fn list_published(&self) -> Result<Vec<Video>> {
        Ok(self
            .state
            .read()
            .await
            .videos
            .values()
            .filter(|video| video.published)
            .cloned()
            .collect())
    }

    async fn list_by_author(&self, author: AccountID) -> Result<Vec<Video>> {
        Ok(self
            .state
            .read()
            .await
            .videos
            .values()
            .filter(|video| video.author_id == author)
            .cloned()
            .collect())
    }

    async fn update_video(
        &self,
        id: VideoID,
        author: AccountID,
        patch: &VideoPatch,
    ) -> Result<Option<Video>> {
        let mut state = self.state.write().await;
        let Some(video) = state
            .videos
            .get_mut(&id)
            .filter(|video| video.author_id == author)
        else {
            return Ok(None);
        };

        if let Some(title) = &patch.title {
            video.title = title.clone();
        }
        if let Some(src) = &patch.src {
            video.src = src.clone();
        }
        Ok(Some(video.clone()))
    }

    async fn set_published(
        &self,
        id: VideoID,
        author: AccountID,
        published: bool,
    ) -> Result<Option<Video>> {
        let mut state = self.state.write().await;
        Ok(state
            .videos
            .get_mut(&id)
            .filter(|video| video.author_id == author)
            .map(|video| {
                video.published = published;
                video.clone()
            }))
    }

    async fn load_video_with_relations(
        &self,
        id: VideoID,
    ) -> Result<Option<VideoWithRelations>> {
        let state = self.state.read().await;
        Ok(state
            .videos
            .get(&id)
            .map(|video| state.video_with_relations(video)))
    }
}

#[async_trait]
impl EdgesRepository for InMemoryEntityStore {
    async fn connect(&self, edge: EdgeRef) -> Result<EdgeChange> {
        let mut state = self.state.write().await;
        match edge {
            EdgeRef::Follow { follower, target } => {
                if follower == target {
                    return Err(StoreError::Internal(
                        "check violation: account_follows_no_self".into(),
                    ));
                }
                state.require_account(follower)?;
                state.require_account(target)?;
                let inserted = state.follows.insert((follower, target));
                Ok(EdgeChange::from_rows_affected(inserted as u64))
            }
            EdgeRef::Engagement {
                account,
                video,
                kind,
            } => {
                state.require_account(account)?;
                let published = state
                    .videos
                    .get(&video)
                    .is_some_and(|video| video.published);
                if !published {
                    return Ok(EdgeChange::Unchanged);
                }
                let inserted =
                    state.engagements_mut(kind).insert((video, account));
                Ok(EdgeChange::from_rows_affected(inserted as u64))
            }
        }
    }

    async fn disconnect(&self, edge: EdgeRef) -> Result<EdgeChange> {
        let mut state = self.state.write().await;
        match edge {
            EdgeRef::Follow { follower, target } => {
                let removed = state.follows.remove(&(follower, target));
                Ok(EdgeChange::from_rows_affected(removed as u64))
            }
            EdgeRef::Engagement {
                account,
                video,
                kind,
            } => {
                let published = state
                    .videos
                    .get(&video)
                    .is_some_and(|video| video.published);
                if !published {
                    return Ok(EdgeChange::Unchanged);
                }
                let removed =
                    state.engagements_mut(kind).remove(&(video, account));
                Ok(EdgeChange::from_rows_affected(removed as u64))
            }
        }
    }
}
