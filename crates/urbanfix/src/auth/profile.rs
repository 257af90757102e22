use std::sync::Arc;

use tracing::info;

use crate::store::UserStore;
use crate::sync::KeyedLocks;

use super::domain::{Address, BankAccount, User};
use super::service::AuthError;

/// Profile mutations over the `users` collection.
///
/// The store only replaces whole documents, so every mutation here is a
/// read-modify-write; edits for one user run under a keyed lock so two
/// concurrent saves cannot drop each other's writes. Out-of-range address
/// indices are silent no-ops and return the record unchanged.
pub struct ProfileService<U> {
    users: Arc<U>,
    locks: KeyedLocks<String>,
}

impl<U> ProfileService<U>
where
    U: UserStore + 'static,
{
    pub fn new(users: Arc<U>) -> Self {
        Self {
            users,
            locks: KeyedLocks::new(),
        }
    }

    pub async fn get(&self, user_id: &str) -> Result<User, AuthError> {
        Ok(self.users.get(user_id).await?)
    }

    pub async fn update_bio(&self, user_id: &str, bio: String) -> Result<User, AuthError> {
        self.modify(user_id, |user| user.bio = Some(bio)).await
    }

    /// Save the bank details later snapshotted onto payout transactions.
    pub async fn set_bank_account(
        &self,
        user_id: &str,
        account: BankAccount,
    ) -> Result<User, AuthError> {
        let updated = self
            .modify(user_id, |user| user.bank_account = Some(account))
            .await?;
        info!(user_id, "bank account saved");
        Ok(updated)
    }

    pub async fn update_service_areas(
        &self,
        user_id: &str,
        service_areas: Vec<String>,
    ) -> Result<User, AuthError> {
        self.modify(user_id, |user| user.service_areas = service_areas)
            .await
    }

    pub async fn add_address(&self, user_id: &str, address: Address) -> Result<User, AuthError> {
        self.modify(user_id, |user| user.addresses.push(address))
            .await
    }

    pub async fn update_address(
        &self,
        user_id: &str,
        index: usize,
        address: Address,
    ) -> Result<User, AuthError> {
        self.modify(user_id, move |user| {
            if let Some(slot) = user.addresses.get_mut(index) {
                *slot = address;
            }
        })
        .await
    }

    pub async fn remove_address(&self, user_id: &str, index: usize) -> Result<User, AuthError> {
        self.modify(user_id, move |user| {
            if index < user.addresses.len() {
                user.addresses.remove(index);
            }
        })
        .await
    }

    async fn modify<F>(&self, user_id: &str, apply: F) -> Result<User, AuthError>
    where
        F: FnOnce(&mut User),
    {
        let _guard = self.locks.acquire(&user_id.to_string()).await;
        let mut user = self.users.get(user_id).await?;
        apply(&mut user);
        Ok(self.users.update(user).await?)
    }
}
