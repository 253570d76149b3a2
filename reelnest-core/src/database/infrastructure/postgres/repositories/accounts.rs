use async_trait::async_trait;
use reelnest_model::{
    Account, AccountID, AccountWithRelations, Role, VideoID, VideoRef,
};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use super::{begin_snapshot, map_account_summary, map_video_summary};
use crate::database::ports::accounts::AccountsRepository;
use crate::error::{Result, StoreError};

/// PostgreSQL-backed implementation of the `AccountsRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresAccountsRepository {
    pool: PgPool,
}

impl PostgresAccountsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_row(row: &PgRow) -> Result<Account> {
        let id: Uuid = row.try_get("id").map_err(|e| {
            StoreError::Internal(format!("Failed to read account id: {e}"))
        })?;
        let email: String = row.try_get("email").map_err(|e| {
            StoreError::Internal(format!("Failed to read account email: {e}"))
        })?;
        let name: String = row.try_get("name").map_err(|e| {
            StoreError::Internal(format!("Failed to read account name: {e}"))
        })?;
        let role: String = row.try_get("role").map_err(|e| {
            StoreError::Internal(format!("Failed to read account role: {e}"))
        })?;
        let photo: Option<String> = row.try_get("photo").map_err(|e| {
            StoreError::Internal(format!("Failed to read account photo: {e}"))
        })?;

        let role = role
            .parse::<Role>()
            .map_err(|e| StoreError::Internal(e.to_string()))?;

        Ok(Account {
            id: AccountID(id),
            email,
            name,
            role,
            photo,
        })
    }
}

#[async_trait]
impl AccountsRepository for PostgresAccountsRepository {
    async fn create_account_with_password(
        &self,
        account: &Account,
        password_hash: &str,
    ) -> Result<()> {
        let mut tx = self.pool().begin().await.map_err(|e| {
            StoreError::Internal(format!("Failed to start transaction: {e}"))
        })?;

        sqlx::query(
            r#"
            INSERT INTO accounts (id, email, name, role, photo)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(account.id.to_uuid())
        .bind(&account.email)
        .bind(&account.name)
        .bind(account.role.as_str())
        .bind(account.photo.as_deref())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(constraint) =
                e.as_database_error().and_then(|db_err| db_err.constraint())
                && matches!(constraint, "accounts_email_key" | "accounts_pkey")
            {
                return StoreError::UniqueViolation(constraint.to_string());
            }
            StoreError::Internal(format!("Failed to create account: {e}"))
        })?;

        sqlx::query(
            r#"
            INSERT INTO account_credentials (account_id, password_hash)
            VALUES ($1, $2)
            "#,
        )
        .bind(account.id.to_uuid())
        .bind(password_hash)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            StoreError::Internal(format!("Failed to store credentials: {e}"))
        })?;

        tx.commit().await.map_err(|e| {
            StoreError::Internal(format!("Failed to commit transaction: {e}"))
        })?;

        info!("Created account {} ({})", account.id, account.email);
        Ok(())
    }

    async fn get_account(&self, id: AccountID) -> Result<Option<Account>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, name, role, photo
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.to_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| {
            StoreError::Internal(format!("Failed to load account: {e}"))
        })?;

        row.map(|row| Self::map_row(&row)).transpose()
    }

    async fn get_account_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Account>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, name, role, photo
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| {
            StoreError::Internal(format!("Failed to lookup account: {e}"))
        })?;

        row.map(|row| Self::map_row(&row)).transpose()
    }

    async fn get_password_hash(&self, id: AccountID) -> Result<Option<String>> {
        let row = sqlx::query(
            "SELECT password_hash FROM account_credentials WHERE account_id = $1",
        )
        .bind(id.to_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| {
            StoreError::Internal(format!("Failed to load credentials: {e}"))
        })?;

        row.map(|row| {
            row.try_get::<String, _>("password_hash").map_err(|e| {
                StoreError::Internal(format!(
                    "Failed to read password hash: {e}"
                ))
            })
        })
        .transpose()
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        let rows = sqlx::query(
            r#"
            SELECT id, email, name, role, photo
            FROM accounts
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            StoreError::Internal(format!("Failed to list accounts: {e}"))
        })?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn load_account_with_relations(
        &self,
        id: AccountID,
    ) -> Result<Option<AccountWithRelations>> {
        let mut tx = begin_snapshot(self.pool()).await?;

        let row = sqlx::query(
            "SELECT id, email, name, role, photo FROM accounts WHERE id = $1",
        )
        .bind(id.to_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            StoreError::Internal(format!("Failed to load account: {e}"))
        })?;
        let Some(row) = row else {
            return Ok(None);
        };
        let account = Self::map_row(&row)?;

        let following = sqlx::query(
            r#"
            SELECT a.id, a.email
            FROM account_follows f
            JOIN accounts a ON a.id = f.following_id
            WHERE f.follower_id = $1
            ORDER BY f.created_at, a.id
            "#,
        )
        .bind(id.to_uuid())
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| {
            StoreError::Internal(format!("Failed to load following: {e}"))
        })?
        .iter()
        .map(map_account_summary)
        .collect::<Result<Vec<_>>>()?;

        let followed_by = sqlx::query(
            r#"
            SELECT a.id, a.email
            FROM account_follows f
            JOIN accounts a ON a.id = f.follower_id
            WHERE f.following_id = $1
            ORDER BY f.created_at, a.id
            "#,
        )
        .bind(id.to_uuid())
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| {
            StoreError::Internal(format!("Failed to load followers: {e}"))
        })?
        .iter()
        .map(map_account_summary)
        .collect::<Result<Vec<_>>>()?;

        let videos = sqlx::query(
            r#"
            SELECT id, title
            FROM videos
            WHERE author_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(id.to_uuid())
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| {
            StoreError::Internal(format!("Failed to load owned videos: {e}"))
        })?
        .iter()
        .map(map_video_summary)
        .collect::<Result<Vec<_>>>()?;

        let favorite_videos = sqlx::query(
            r#"
            SELECT v.id, v.title
            FROM video_favorites fav
            JOIN videos v ON v.id = fav.video_id
            WHERE fav.account_id = $1
            ORDER BY fav.created_at, v.id
            "#,
        )
        .bind(id.to_uuid())
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| {
            StoreError::Internal(format!("Failed to load favorites: {e}"))
        })?
        .iter()
        .map(map_video_summary)
        .collect::<Result<Vec<_>>>()?;

        let likes = sqlx::query(
            r#"
            SELECT video_id
            FROM video_likes
            WHERE account_id = $1
            ORDER BY created_at, video_id
            "#,
        )
        .bind(id.to_uuid())
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| {
            StoreError::Internal(format!("Failed to load likes: {e}"))
        })?
        .iter()
        .map(|row| {
            row.try_get::<Uuid, _>("video_id")
                .map(|id| VideoRef { id: VideoID(id) })
                .map_err(|e| {
                    StoreError::Internal(format!("Failed to read video_id: {e}"))
                })
        })
        .collect::<Result<Vec<_>>>()?;

        tx.commit().await.map_err(|e| {
            StoreError::Internal(format!("Failed to close snapshot: {e}"))
        })?;

        Ok(Some(AccountWithRelations {
            account,
            following,
            followed_by,
            videos,
            favorite_videos,
            likes,
        }))
    }
}
