use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::auth::{Role, User};
use crate::config::PolicyConfig;
use crate::marketplace::bookings::{Booking, BookingCreate, BookingManager, BookingPatch};
use crate::marketplace::catalog::{PriceType, ServiceEntity};
use crate::marketplace::ledger::domain::{Earning, Transaction};
use crate::marketplace::ledger::EarningsLedger;
use crate::store::{BookingStore, LedgerStore, StoreError};

/// In-memory `bookings` collection.
#[derive(Default, Clone)]
pub(super) struct MemoryBookings {
    pub(super) records: Arc<Mutex<Vec<Booking>>>,
}

#[async_trait]
impl BookingStore for MemoryBookings {
    async fn list(&self) -> Result<Vec<Booking>, StoreError> {
        Ok(self.records.lock().expect("bookings mutex poisoned").clone())
    }

    async fn by_user(&self, user_id: &str) -> Result<Vec<Booking>, StoreError> {
        let guard = self.records.lock().expect("bookings mutex poisoned");
        Ok(guard
            .iter()
            .filter(|booking| booking.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Booking, StoreError> {
        let guard = self.records.lock().expect("bookings mutex poisoned");
        guard
            .iter()
            .find(|booking| booking.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("booking", id))
    }

    async fn create(&self, booking: Booking) -> Result<Booking, StoreError> {
        let mut guard = self.records.lock().expect("bookings mutex poisoned");
        if guard.iter().any(|existing| existing.id == booking.id) {
            return Err(StoreError::conflict("booking", booking.id));
        }
        guard.push(booking.clone());
        Ok(booking)
    }

    async fn update(&self, id: &str, patch: BookingPatch) -> Result<Booking, StoreError> {
        let mut guard = self.records.lock().expect("bookings mutex poisoned");
        let booking = guard
            .iter_mut()
            .find(|booking| booking.id == id)
            .ok_or_else(|| StoreError::not_found("booking", id))?;
        if let Some(status) = patch.status {
            booking.status = status;
        }
        if patch.completed_at.is_some() {
            booking.completed_at = patch.completed_at;
        }
        if patch.cancelled_at.is_some() {
            booking.cancelled_at = patch.cancelled_at;
        }
        Ok(booking.clone())
    }
}

/// In-memory ledger double so completions have somewhere to post.
#[derive(Default, Clone)]
pub(super) struct MemoryLedger {
    pub(super) earnings: Arc<Mutex<Vec<Earning>>>,
    pub(super) transactions: Arc<Mutex<Vec<Transaction>>>,
}

#[async_trait]
impl LedgerStore for MemoryLedger {
    async fn earning_for_partner(&self, partner_id: &str) -> Result<Option<Earning>, StoreError> {
        let guard = self.earnings.lock().expect("earnings mutex poisoned");
        Ok(guard
            .iter()
            .find(|earning| earning.partner_id == partner_id)
            .cloned())
    }

    async fn create_earning(&self, earning: Earning) -> Result<Earning, StoreError> {
        let mut guard = self.earnings.lock().expect("earnings mutex poisoned");
        guard.push(earning.clone());
        Ok(earning)
    }

    async fn update_earning(&self, earning: Earning) -> Result<Earning, StoreError> {
        let mut guard = self.earnings.lock().expect("earnings mutex poisoned");
        let existing = guard
            .iter_mut()
            .find(|existing| existing.id == earning.id)
            .ok_or_else(|| StoreError::not_found("earning", earning.id.clone()))?;
        *existing = earning.clone();
        Ok(earning)
    }

    async fn append_transaction(
        &self,
        transaction: Transaction,
    ) -> Result<Transaction, StoreError> {
        let mut guard = self.transactions.lock().expect("transactions mutex poisoned");
        guard.push(transaction.clone());
        Ok(transaction)
    }

    async fn transactions_for_partner(
        &self,
        partner_id: &str,
    ) -> Result<Vec<Transaction>, StoreError> {
        let guard = self.transactions.lock().expect("transactions mutex poisoned");
        Ok(guard
            .iter()
            .filter(|transaction| transaction.partner_id == partner_id)
            .cloned()
            .collect())
    }
}

/// Ledger double whose appends can be switched off to simulate an outage.
#[derive(Default, Clone)]
pub(super) struct FlakyLedger {
    pub(super) inner: MemoryLedger,
    pub(super) fail_appends: Arc<AtomicBool>,
}

#[async_trait]
impl LedgerStore for FlakyLedger {
    async fn earning_for_partner(&self, partner_id: &str) -> Result<Option<Earning>, StoreError> {
        self.inner.earning_for_partner(partner_id).await
    }

    async fn create_earning(&self, earning: Earning) -> Result<Earning, StoreError> {
        self.inner.create_earning(earning).await
    }

    async fn update_earning(&self, earning: Earning) -> Result<Earning, StoreError> {
        self.inner.update_earning(earning).await
    }

    async fn append_transaction(
        &self,
        transaction: Transaction,
    ) -> Result<Transaction, StoreError> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection reset".to_string()));
        }
        self.inner.append_transaction(transaction).await
    }

    async fn transactions_for_partner(
        &self,
        partner_id: &str,
    ) -> Result<Vec<Transaction>, StoreError> {
        self.inner.transactions_for_partner(partner_id).await
    }
}

pub(super) fn manager() -> (
    BookingManager<MemoryBookings, MemoryLedger>,
    MemoryBookings,
    MemoryLedger,
) {
    let bookings = MemoryBookings::default();
    let ledger_store = MemoryLedger::default();
    let ledger = Arc::new(EarningsLedger::new(
        Arc::new(ledger_store.clone()),
        PolicyConfig::default(),
    ));
    (
        BookingManager::new(Arc::new(bookings.clone()), ledger, PolicyConfig::default()),
        bookings,
        ledger_store,
    )
}

pub(super) fn manager_with_flaky_ledger() -> (
    BookingManager<MemoryBookings, FlakyLedger>,
    MemoryBookings,
    FlakyLedger,
) {
    let bookings = MemoryBookings::default();
    let ledger_store = FlakyLedger::default();
    let ledger = Arc::new(EarningsLedger::new(
        Arc::new(ledger_store.clone()),
        PolicyConfig::default(),
    ));
    (
        BookingManager::new(Arc::new(bookings.clone()), ledger, PolicyConfig::default()),
        bookings,
        ledger_store,
    )
}

pub(super) fn booking_create(user_id: &str, service_id: &str) -> BookingCreate {
    BookingCreate {
        user_id: user_id.to_string(),
        service_id: service_id.to_string(),
        price: 1000.0,
        offer_discount: 20.0,
        schedule: Utc.with_ymd_and_hms(2026, 9, 4, 10, 0, 0).unwrap(),
        address: "12 MG Road, Kochi".to_string(),
        special_instructions: None,
    }
}

pub(super) fn listing(id: &str, partner_id: &str, title: &str) -> ServiceEntity {
    ServiceEntity {
        id: id.to_string(),
        partner_id: partner_id.to_string(),
        title: title.to_string(),
        description: None,
        category_id: "cat-clean".to_string(),
        price_type: PriceType::Hourly,
        price: 1000.0,
        duration: 120,
        has_offer: true,
        offer_title: "Monsoon offer".to_string(),
        offer_discount: 20.0,
        active: true,
        ratings: Vec::new(),
    }
}

pub(super) fn account(id: &str, name: &str, role: Role) -> User {
    User {
        id: id.to_string(),
        user_name: name.to_string(),
        phone_number: "9876543210".to_string(),
        role,
        email: format!("{id}@example.com"),
        bio: None,
        addresses: Vec::new(),
        bank_account: None,
        service_areas: Vec::new(),
        password: None,
    }
}
