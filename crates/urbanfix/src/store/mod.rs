//! Persistence collaborator traits.
//!
//! The backend is a flat REST document store: per-collection list,
//! single-field equality lookups, get-by-id, create with caller-supplied
//! ids, partial update, and delete. No transactional guarantees exist across
//! resources, which is why mutating services serialize their own
//! read-modify-write sequences (see [`crate::sync::KeyedLocks`]).
//!
//! [`SessionStore`] is the odd one out: it models the browser's session
//! storage (string key/value), used by auth state and the registration
//! wizard rather than the network store.

use async_trait::async_trait;

use crate::auth::User;
use crate::marketplace::bookings::{Booking, BookingPatch};
use crate::marketplace::catalog::{Category, ServiceEntity, ServiceUpdate};
use crate::marketplace::ledger::{Earning, Transaction};
use crate::marketplace::portfolio::{Portfolio, PortfolioUpdate};

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },
    #[error("{resource} '{id}' already exists")]
    Conflict { resource: &'static str, id: String },
    /// Opaque transport failure; callers surface it without retrying.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn conflict(resource: &'static str, id: impl Into<String>) -> Self {
        Self::Conflict {
            resource,
            id: id.into(),
        }
    }
}

/// `users` collection.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, StoreError>;
    async fn get(&self, id: &str) -> Result<User, StoreError>;
    async fn create(&self, user: User) -> Result<User, StoreError>;
    /// Full-record replace (the profile screens PUT the whole document).
    async fn update(&self, user: User) -> Result<User, StoreError>;
}

/// `services` collection.
#[async_trait]
pub trait ServiceStore: Send + Sync {
    async fn list(&self) -> Result<Vec<ServiceEntity>, StoreError>;
    async fn by_category(&self, category_id: &str) -> Result<Vec<ServiceEntity>, StoreError>;
    async fn by_partner(&self, partner_id: &str) -> Result<Vec<ServiceEntity>, StoreError>;
    async fn get(&self, id: &str) -> Result<ServiceEntity, StoreError>;
    async fn create(&self, service: ServiceEntity) -> Result<ServiceEntity, StoreError>;
    async fn update(&self, id: &str, patch: ServiceUpdate) -> Result<ServiceEntity, StoreError>;
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// `bookings` collection.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Booking>, StoreError>;
    async fn by_user(&self, user_id: &str) -> Result<Vec<Booking>, StoreError>;
    async fn get(&self, id: &str) -> Result<Booking, StoreError>;
    async fn create(&self, booking: Booking) -> Result<Booking, StoreError>;
    async fn update(&self, id: &str, patch: BookingPatch) -> Result<Booking, StoreError>;
}

/// `earnings` and `transactions` collections, always consumed together.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn earning_for_partner(&self, partner_id: &str) -> Result<Option<Earning>, StoreError>;
    async fn create_earning(&self, earning: Earning) -> Result<Earning, StoreError>;
    /// Replace the amounts on an existing earnings record.
    async fn update_earning(&self, earning: Earning) -> Result<Earning, StoreError>;
    /// Transactions are an append-only ledger; there is no update or delete.
    async fn append_transaction(&self, transaction: Transaction)
        -> Result<Transaction, StoreError>;
    async fn transactions_for_partner(
        &self,
        partner_id: &str,
    ) -> Result<Vec<Transaction>, StoreError>;
}

/// `portfolio` collection.
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Portfolio>, StoreError>;
    async fn by_partner(&self, partner_id: &str) -> Result<Vec<Portfolio>, StoreError>;
    async fn get(&self, id: &str) -> Result<Portfolio, StoreError>;
    async fn create(&self, item: Portfolio) -> Result<Portfolio, StoreError>;
    async fn update(&self, id: &str, patch: PortfolioUpdate) -> Result<Portfolio, StoreError>;
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// `categories` collection (read-mostly reference data).
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Category>, StoreError>;
    async fn get(&self, id: &str) -> Result<Category, StoreError>;
}

/// Session-scoped string key/value storage (browser storage analog).
///
/// Synchronous on purpose: implementations are process-local.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
