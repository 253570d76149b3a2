use async_trait::async_trait;
use reelnest_model::{Account, AccountID, AccountWithRelations};

use crate::error::Result;

/// Account storage, including the opaque password credential owned by the
/// auth layer.
#[async_trait]
pub trait AccountsRepository: Send + Sync {
    /// Fails with [`StoreError::UniqueViolation`](crate::error::StoreError)
    /// when the email is already registered.
    async fn create_account_with_password(
        &self,
        account: &Account,
        password_hash: &str,
    ) -> Result<()>;
    async fn get_account(&self, id: AccountID) -> Result<Option<Account>>;
    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>>;
    async fn get_password_hash(&self, id: AccountID) -> Result<Option<String>>;
    async fn list_accounts(&self) -> Result<Vec<Account>>;

    /// Read the account and all of its relation sets as one snapshot.
    async fn load_account_with_relations(
        &self,
        id: AccountID,
    ) -> Result<Option<AccountWithRelations>>;
}
