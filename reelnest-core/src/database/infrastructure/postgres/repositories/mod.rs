//! PostgreSQL-backed repository implementations.

pub mod accounts;
pub mod edges;
pub mod videos;

use reelnest_model::{AccountID, AccountSummary, Video, VideoID, VideoSummary};
use sqlx::{Row, postgres::PgRow};
use uuid::Uuid;

use crate::error::{Result, StoreError};

pub(crate) fn map_account_summary(row: &PgRow) -> Result<AccountSummary> {
    let id: Uuid = row.try_get("id").map_err(|e| {
        StoreError::Internal(format!("Failed to read account id: {e}"))
    })?;
    let email: String = row.try_get("email").map_err(|e| {
        StoreError::Internal(format!("Failed to read account email: {e}"))
    })?;

    Ok(AccountSummary {
        id: AccountID(id),
        email,
    })
}

pub(crate) fn map_video(row: &PgRow) -> Result<Video> {
    let id: Uuid = row.try_get("id").map_err(|e| {
        StoreError::Internal(format!("Failed to read video id: {e}"))
    })?;
    let title: String = row.try_get("title").map_err(|e| {
        StoreError::Internal(format!("Failed to read video title: {e}"))
    })?;
    let src: String = row.try_get("src").map_err(|e| {
        StoreError::Internal(format!("Failed to read video src: {e}"))
    })?;
    let published: bool = row.try_get("published").map_err(|e| {
        StoreError::Internal(format!("Failed to read published flag: {e}"))
    })?;
    let author_id: Uuid = row.try_get("author_id").map_err(|e| {
        StoreError::Internal(format!("Failed to read author_id: {e}"))
    })?;

    Ok(Video {
        id: VideoID(id),
        title,
        src,
        published,
        author_id: AccountID(author_id),
    })
}

pub(crate) fn map_video_summary(row: &PgRow) -> Result<VideoSummary> {
    let id: Uuid = row.try_get("id").map_err(|e| {
        StoreError::Internal(format!("Failed to read video id: {e}"))
    })?;
    let title: String = row.try_get("title").map_err(|e| {
        StoreError::Internal(format!("Failed to read video title: {e}"))
    })?;

    Ok(VideoSummary {
        id: VideoID(id),
        title,
    })
}

/// Relation reads run several statements; repeatable read makes them observe
/// one snapshot.
pub(crate) async fn begin_snapshot(
    pool: &sqlx::PgPool,
) -> Result<sqlx::Transaction<'static, sqlx::Postgres>> {
    let mut tx = pool.begin().await.map_err(|e| {
        StoreError::Internal(format!("Failed to start transaction: {e}"))
    })?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            StoreError::Internal(format!("Failed to set isolation level: {e}"))
        })?;
    Ok(tx)
}
