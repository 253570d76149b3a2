use async_trait::async_trait;
use reelnest_model::{AccountID, Video, VideoID, VideoPatch, VideoWithRelations};

use crate::error::Result;

#[async_trait]
pub trait VideosRepository: Send + Sync {
    async fn create_video(&self, video: &Video) -> Result<()>;
    async fn get_video(&self, id: VideoID) -> Result<Option<Video>>;
    async fn list_published(&self) -> Result<Vec<Video>>;
    async fn list_by_author(&self, author: AccountID) -> Result<Vec<Video>>;

    /// Apply `patch` to the video only if `author` owns it. Returns `None`
    /// when no video matched both conditions.
    async fn update_video(
        &self,
        id: VideoID,
        author: AccountID,
        patch: &VideoPatch,
    ) -> Result<Option<Video>>;

    /// Set the published flag only if `author` owns the video. Returns `None`
    /// when no video matched both conditions.
    async fn set_published(
        &self,
        id: VideoID,
        author: AccountID,
        published: bool,
    ) -> Result<Option<Video>>;

    async fn load_video_with_relations(
        &self,
        id: VideoID,
    ) -> Result<Option<VideoWithRelations>>;
}
