use async_trait::async_trait;
use reelnest_model::{
    AccountID, Video, VideoID, VideoPatch, VideoWithRelations,
};
use sqlx::PgPool;
use tracing::info;

use super::{begin_snapshot, map_account_summary, map_video};
use crate::database::ports::videos::VideosRepository;
use crate::error::{Result, StoreError};

/// PostgreSQL-backed implementation of the `VideosRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresVideosRepository {
    pool: PgPool,
}

impl PostgresVideosRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl VideosRepository for PostgresVideosRepository {
    async fn create_video(&self, video: &Video) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO videos (id, title, src, published, author_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(video.id.to_uuid())
        .bind(&video.title)
        .bind(&video.src)
        .bind(video.published)
        .bind(video.author_id.to_uuid())
        .execute(self.pool())
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error()
                && db_err.constraint() == Some("videos_pkey")
            {
                return StoreError::UniqueViolation("videos_pkey".to_string());
            }
            StoreError::Internal(format!("Failed to create video: {e}"))
        })?;

        info!("Created video {} for account {}", video.id, video.author_id);
        Ok(())
    }

    async fn get_video(&self, id: VideoID) -> Result<Option<Video>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, src, published, author_id
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(id.to_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| StoreError::Internal(format!("Failed to load video: {e}")))?;

        row.map(|row| map_video(&row)).transpose()
    }

    async fn list_published(&self) -> Result<Vec<Video>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, src, published, author_id
            FROM videos
            WHERE published
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            StoreError::Internal(format!("Failed to list published videos: {e}"))
        })?;

        rows.iter().map(map_video).collect()
    }

    async fn list_by_author(&self, author: AccountID) -> Result<Vec<Video>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, src, published, author_id
            FROM videos
            WHERE author_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(author.to_uuid())
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            StoreError::Internal(format!("Failed to list videos by author: {e}"))
        })?;

        rows.iter().map(map_video).collect()
    }

    async fn update_video(
        &self,
        id: VideoID,
        author: AccountID,
        patch: &VideoPatch,
    ) -> Result<Option<Video>> {
        let row = sqlx::query(
            r#"
            UPDATE videos
            SET
                title = COALESCE($3, title),
                src = COALESCE($4, src),
                updated_at = NOW()
            WHERE id = $1 AND author_id = $2
            RETURNING id, title, src, published, author_id
            "#,
        )
        .bind(id.to_uuid())
        .bind(author.to_uuid())
        .bind(patch.title.as_deref())
        .bind(patch.src.as_deref())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| StoreError::Internal(format!("Failed to update video: {e}")))?;

        row.map(|row| map_video(&row)).transpose()
    }

    async fn set_published(
        &self,
        id: VideoID,
        author: AccountID,
        published: bool,
    ) -> Result<Option<Video>> {
        let row = sqlx::query(
            r#"
            UPDATE videos
            SET published = $3, updated_at = NOW()
            WHERE id = $1 AND author_id = $2
            RETURNING id, title, src, published, author_id
            "#,
        )
        .bind(id.to_uuid())
        .bind(author.to_uuid())
        .bind(published)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| {
            StoreError::Internal(format!("Failed to update publication state: {e}"))
        })?;

        row.map(|row| map_video(&row)).transpose()
    }

    async fn load_video_with_relations(
        &self,
        id: VideoID,
    ) -> Result<Option<VideoWithRelations>> {
        let mut tx = begin_snapshot(self.pool()).await?;

        let row = sqlx::query(
            r#"
            SELECT id, title, src, published, author_id
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(id.to_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| StoreError::Internal(format!("Failed to load video: {e}")))?;
        let Some(row) = row else {
            return Ok(None);
        };
        let video = map_video(&row)?;

        let liked_by = sqlx::query(
            r#"
            SELECT a.id, a.email
            FROM video_likes l
            JOIN accounts a ON a.id = l.account_id
            WHERE l.video_id = $1
            ORDER BY l.created_at, a.id
            "#,
        )
        .bind(id.to_uuid())
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| StoreError::Internal(format!("Failed to load likes: {e}")))?
        .iter()
        .map(map_account_summary)
        .collect::<Result<Vec<_>>>()?;

        let favorited_by = sqlx::query(
            r#"
            SELECT a.id, a.email
            FROM video_favorites fav
            JOIN accounts a ON a.id = fav.account_id
            WHERE fav.video_id = $1
            ORDER BY fav.created_at, a.id
            "#,
        )
        .bind(id.to_uuid())
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| {
            StoreError::Internal(format!("Failed to load favorites: {e}"))
        })?
        .iter()
        .map(map_account_summary)
        .collect::<Result<Vec<_>>>()?;

        tx.commit().await.map_err(|e| {
            StoreError::Internal(format!("Failed to close snapshot: {e}"))
        })?;

        Ok(Some(VideoWithRelations {
            video,
            liked_by,
            favorited_by,
        }))
    }
}
