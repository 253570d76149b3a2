//! Follow graph between accounts.
//!
//! Follow and unfollow are idempotent by rejection: repeating a successful
//! call fails with [`RelationError::Conflict`] instead of silently succeeding.

use std::{any::type_name_of_val, fmt, sync::Arc};

use reelnest_model::{AccountID, AccountWithRelations};
use tracing::{info, instrument, warn};

use crate::application::unit_of_work::AppUnitOfWork;
use crate::database::ports::{
    accounts::AccountsRepository,
    edges::{EdgeRef, EdgesRepository},
};
use crate::domain::error::{RelationError, RelationResult};
use crate::domain::relations::{RelationResolver, account_not_found};

#[derive(Clone)]
pub struct SocialGraphService {
    resolver: RelationResolver,
    accounts: Arc<dyn AccountsRepository>,
    edges: Arc<dyn EdgesRepository>,
}

impl fmt::Debug for SocialGraphService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SocialGraphService")
            .field("resolver", &self.resolver)
            .field("edges", &type_name_of_val(self.edges.as_ref()))
            .finish()
    }
}

impl SocialGraphService {
    pub fn new(unit_of_work: &AppUnitOfWork) -> Self {
        Self {
            resolver: RelationResolver::new(unit_of_work),
            accounts: unit_of_work.accounts.clone(),
            edges: unit_of_work.edges.clone(),
        }
    }

    /// Make `follower` follow `following`. Returns the followed account with
    /// its updated relation sets.
    #[instrument(skip(self))]
    pub async fn follow(
        &self,
        follower: AccountID,
        following: AccountID,
    ) -> RelationResult<AccountWithRelations> {
        let target = self.resolver.load_account_with_relations(following).await?;
        if follower == following {
            return Err(RelationError::Forbidden(
                "You cannot follow yourself.".to_string(),
            ));
        }
        self.ensure_account_exists(follower).await?;

        let already_following = || {
            RelationError::Conflict(format!(
                "User: {follower} is already following user: {following}"
            ))
        };
        if target.is_followed_by(follower) {
            return Err(already_following());
        }

        let change = self
            .edges
            .connect(EdgeRef::Follow {
                follower,
                target: following,
            })
            .await?;
        if !change.is_applied() {
            warn!("follow edge appeared between check and write");
            return Err(already_following());
        }

        info!("account {follower} now follows {following}");
        self.resolver.load_account_with_relations(following).await
    }

    /// Remove the follow edge from `follower` to `unfollowing`. Returns the
    /// unfollowed account with its updated relation sets.
    #[instrument(skip(self))]
    pub async fn unfollow(
        &self,
        follower: AccountID,
        unfollowing: AccountID,
    ) -> RelationResult<AccountWithRelations> {
        let target = self
            .resolver
            .load_account_with_relations(unfollowing)
            .await?;
        if follower == unfollowing {
            return Err(RelationError::Forbidden(
                "You cannot unfollow yourself.".to_string(),
            ));
        }
        self.ensure_account_exists(follower).await?;

        let not_following = || {
            RelationError::Conflict(format!(
                "User: {follower} is not following user: {unfollowing}"
            ))
        };
        if !target.is_followed_by(follower) {
            return Err(not_following());
        }

        let change = self
            .edges
            .disconnect(EdgeRef::Follow {
                follower,
                target: unfollowing,
            })
            .await?;
        if !change.is_applied() {
            warn!("follow edge vanished between check and write");
            return Err(not_following());
        }

        info!("account {follower} no longer follows {unfollowing}");
        self.resolver.load_account_with_relations(unfollowing).await
    }

    async fn ensure_account_exists(&self, id: AccountID) -> RelationResult<()> {
        match self.accounts.get_account(id).await? {
            Some(_) => Ok(()),
            None => Err(account_not_found(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelnest_model::{Account, Role};

    async fn seed_account(unit_of_work: &AppUnitOfWork, email: &str) -> AccountID {
        let account = Account {
            id: AccountID::new(),
            email: email.to_string(),
            name: email.to_string(),
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

    #[tokio::test]
    async fn missing_target_wins_over_self_follow() {
        let unit_of_work = AppUnitOfWork::in_memory();
        let social = SocialGraphService::new(&unit_of_work);
        let ghost = AccountID::new();

        let err = social.follow(ghost, ghost).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn missing_follower_is_not_found() {
        let unit_of_work = AppUnitOfWork::in_memory();
        let social = SocialGraphService::new(&unit_of_work);
        let target = seed_account(&unit_of_work, "b@example.com").await;
        let ghost = AccountID::new();

        let err = social.follow(ghost, target).await.unwrap_err();
        assert_eq!(err.to_string(), format!("User with id: {ghost} not found."));

        let err = social.unfollow(ghost, target).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn follow_returns_the_updated_target() {
        let unit_of_work = AppUnitOfWork::in_memory();
        let social = SocialGraphService::new(&unit_of_work);
        let a = seed_account(&unit_of_work, "a@example.com").await;
        let b = seed_account(&unit_of_work, "b@example.com").await;

        let target = social.follow(a, b).await.unwrap();
        assert_eq!(target.id(), b);
        assert!(target.is_followed_by(a));

        let err = social.follow(a, b).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("User: {a} is already following user: {b}")
        );
    }
}
