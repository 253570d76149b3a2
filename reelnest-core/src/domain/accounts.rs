use std::{any::type_name_of_val, fmt, sync::Arc};

use reelnest_model::{Account, AccountID, AccountWithRelations, NewAccount};
use tracing::{info, instrument};

use crate::application::unit_of_work::AppUnitOfWork;
use crate::database::ports::accounts::AccountsRepository;
use crate::domain::error::{RelationError, RelationResult};
use crate::domain::relations::RelationResolver;
use crate::domain::validation::validate_new_account;
use crate::error::StoreError;

/// Account registration and lookup.
#[derive(Clone)]
pub struct AccountService {
    accounts: Arc<dyn AccountsRepository>,
    resolver: RelationResolver,
}

impl fmt::Debug for AccountService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountService")
            .field("accounts", &type_name_of_val(self.accounts.as_ref()))
            .finish()
    }
}

impl AccountService {
    pub fn new(unit_of_work: &AppUnitOfWork) -> Self {
        Self {
            accounts: unit_of_work.accounts.clone(),
            resolver: RelationResolver::new(unit_of_work),
        }
    }

    /// Register an account. `password_hash` is the opaque credential produced
    /// by the auth layer.
    #[instrument(skip(self, input, password_hash), fields(email = %input.email))]
    pub async fn create(
        &self,
        input: NewAccount,
        password_hash: &str,
    ) -> RelationResult<Account> {
        validate_new_account(&input)?;

        let account = Account {
            id: AccountID::new(),
            email: input.email.trim().to_string(),
            name: input.name.trim().to_string(),
            role: input.role,
            photo: input.photo,
        };

        match self
            .accounts
            .create_account_with_password(&account, password_hash)
            .await
        {
            Ok(()) => {}
            Err(StoreError::UniqueViolation(_)) => {
                return Err(RelationError::Conflict(format!(
                    "Email: {} already in use.",
                    account.email
                )));
            }
            Err(other) => return Err(other.into()),
        }

        info!("registered account {}", account.id);
        Ok(account)
    }

    pub async fn list(&self) -> RelationResult<Vec<Account>> {
        Ok(self.accounts.list_accounts().await?)
    }

    pub async fn find(
        &self,
        id: AccountID,
    ) -> RelationResult<AccountWithRelations> {
        self.resolver.load_account_with_relations(id).await
    }

    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> RelationResult<Option<Account>> {
        Ok(self.accounts.get_account_by_email(email.trim()).await?)
    }

    pub async fn password_hash(
        &self,
        id: AccountID,
    ) -> RelationResult<Option<String>> {
        Ok(self.accounts.get_password_hash(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelnest_model::Role;

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            name: "john".into(),
            email: email.into(),
            role: Role::Teacher,
            photo: Some("https://robohash.org/stefan-two".into()),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let service = AccountService::new(&AppUnitOfWork::in_memory());
        service
            .create(new_account("john@example.com"), "hash")
            .await
            .unwrap();

        let err = service
            .create(new_account("john@example.com"), "hash")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Email: john@example.com already in use.");
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_the_store() {
        let unit_of_work = AppUnitOfWork::in_memory();
        let service = AccountService::new(&unit_of_work);

        let err = service
            .create(new_account("not-an-email"), "hash")
            .await
            .unwrap_err();
        assert!(matches!(err, RelationError::Validation(_)));
        assert!(unit_of_work.accounts.list_accounts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn credential_is_stored_beside_the_account() {
        let service = AccountService::new(&AppUnitOfWork::in_memory());
        let account = service
            .create(new_account("john@example.com"), "$argon2id$stub")
            .await
            .unwrap();

        assert_eq!(account.role, Role::Teacher);
        assert_eq!(
            service.password_hash(account.id).await.unwrap().as_deref(),
            Some("$argon2id$stub")
        );
        let found = service.find_by_email("john@example.com").await.unwrap();
        assert_eq!(found, Some(account));
    }
}
