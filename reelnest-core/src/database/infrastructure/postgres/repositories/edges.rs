use async_trait::async_trait;
use reelnest_model::EngagementKind;
use sqlx::PgPool;
use tracing::debug;

use crate::database::ports::edges::{EdgeChange, EdgeRef, EdgesRepository};
use crate::error::{Result, StoreError};

const FOLLOW_INSERT: &str = r#"
    INSERT INTO account_follows (follower_id, following_id)
    VALUES ($1, $2)
    ON CONFLICT DO NOTHING
"#;

const FOLLOW_DELETE: &str = r#"
    DELETE FROM account_follows
    WHERE follower_id = $1 AND following_id = $2
"#;

// Engagement writes only touch rows of published videos; the check happens in
// the same statement as the write.
const LIKE_INSERT: &str = r#"
    INSERT INTO video_likes (video_id, account_id)
    SELECT v.id, $2 FROM videos v
    WHERE v.id = $1 AND v.published
    ON CONFLICT DO NOTHING
"#;

const LIKE_DELETE: &str = r#"
    DELETE FROM video_likes l
    USING videos v
    WHERE l.video_id = $1 AND l.account_id = $2
      AND v.id = l.video_id AND v.published
"#;

const FAVORITE_INSERT: &str = r#"
    INSERT INTO video_favorites (video_id, account_id)
    SELECT v.id, $2 FROM videos v
    WHERE v.id = $1 AND v.published
    ON CONFLICT DO NOTHING
"#;

const FAVORITE_DELETE: &str = r#"
    DELETE FROM video_favorites fav
    USING videos v
    WHERE fav.video_id = $1 AND fav.account_id = $2
      AND v.id = fav.video_id AND v.published
"#;

/// PostgreSQL-backed implementation of the `EdgesRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresEdgesRepository {
    pool: PgPool,
}

impl PostgresEdgesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn execute(
        &self,
        sql: &'static str,
        edge: EdgeRef,
        action: &str,
    ) -> Result<EdgeChange> {
        let query = match edge {
            EdgeRef::Follow { follower, target } => sqlx::query(sql)
                .bind(follower.to_uuid())
                .bind(target.to_uuid()),
            EdgeRef::Engagement { account, video, .. } => sqlx::query(sql)
                .bind(video.to_uuid())
                .bind(account.to_uuid()),
        };

        let result = query.execute(self.pool()).await.map_err(|e| {
            StoreError::Internal(format!("Failed to {action} edge {edge}: {e}"))
        })?;

        let change = EdgeChange::from_rows_affected(result.rows_affected());
        debug!(%edge, ?change, "{action} edge");
        Ok(change)
    }
}

#[async_trait]
impl EdgesRepository for PostgresEdgesRepository {
    async fn connect(&self, edge: EdgeRef) -> Result<EdgeChange> {
        let sql = match edge {
            EdgeRef::Follow { .. } => FOLLOW_INSERT,
            EdgeRef::Engagement {
                kind: EngagementKind::Like,
                ..
            } => LIKE_INSERT,
            EdgeRef::Engagement {
                kind: EngagementKind::Favorite,
                ..
            } => FAVORITE_INSERT,
        };
        self.execute(sql, edge, "connect").await
    }

    async fn disconnect(&self, edge: EdgeRef) -> Result<EdgeChange> {
        let sql = match edge {
            EdgeRef::Follow { .. } => FOLLOW_DELETE,
            EdgeRef::Engagement {
                kind: EngagementKind::Like,
                ..
            } => LIKE_DELETE,
            EdgeRef::Engagement {
                kind: EngagementKind::Favorite,
                ..
            } => FAVORITE_DELETE,
        };
        self.execute(sql, edge, "disconnect").await
    }
}
