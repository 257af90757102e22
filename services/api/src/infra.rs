use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use urbanfix::auth::User;
use urbanfix::marketplace::bookings::{Booking, BookingPatch};
use urbanfix::marketplace::catalog::{Category, ServiceEntity, ServiceUpdate};
use urbanfix::marketplace::ledger::{Earning, Transaction};
use urbanfix::marketplace::portfolio::{Portfolio, PortfolioUpdate};
use urbanfix::store::{
    BookingStore, CategoryStore, LedgerStore, PortfolioStore, ServiceStore, SessionStore,
    StoreError, UserStore,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryUsers {
    records: Arc<Mutex<Vec<User>>>,
}

#[async_trait]
impl UserStore for InMemoryUsers {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.records.lock().expect("users mutex poisoned").clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, StoreError> {
        let guard = self.records.lock().expect("users mutex poisoned");
        Ok(guard
            .iter()
            .filter(|user| user.email == email)
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> Result<User, StoreError> {
        let guard = self.records.lock().expect("users mutex poisoned");
        guard
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("user", id))
    }

    async fn create(&self, user: User) -> Result<User, StoreError> {
        let mut guard = self.records.lock().expect("users mutex poisoned");
        if guard.iter().any(|existing| existing.id == user.id) {
            return Err(StoreError::conflict("user", user.id));
        }
        guard.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, StoreError> {
        let mut guard = self.records.lock().expect("users mutex poisoned");
        let existing = guard
            .iter_mut()
            .find(|existing| existing.id == user.id)
            .ok_or_else(|| StoreError::not_found("user", user.id.clone()))?;
        *existing = user.clone();
        Ok(user)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryServices {
    records: Arc<Mutex<Vec<ServiceEntity>>>,
}

#[async_trait]
impl ServiceStore for InMemoryServices {
    async fn list(&self) -> Result<Vec<ServiceEntity>, StoreError> {
        Ok(self.records.lock().expect("services mutex poisoned").clone())
    }

    async fn by_category(&self, category_id: &str) -> Result<Vec<ServiceEntity>, StoreError> {
        let guard = self.records.lock().expect("services mutex poisoned");
        Ok(guard
            .iter()
            .filter(|service| service.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn by_partner(&self, partner_id: &str) -> Result<Vec<ServiceEntity>, StoreError> {
        let guard = self.records.lock().expect("services mutex poisoned");
        Ok(guard
            .iter()
            .filter(|service| service.partner_id == partner_id)
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> Result<ServiceEntity, StoreError> {
        let guard = self.records.lock().expect("services mutex poisoned");
        guard
            .iter()
            .find(|service| service.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("service", id))
    }

    async fn create(&self, service: ServiceEntity) -> Result<ServiceEntity, StoreError> {
        let mut guard = self.records.lock().expect("services mutex poisoned");
        if guard.iter().any(|existing| existing.id == service.id) {
            return Err(StoreError::conflict("service", service.id));
        }
        guard.push(service.clone());
        Ok(service)
    }

    async fn update(&self, id: &str, patch: ServiceUpdate) -> Result<ServiceEntity, StoreError> {
        let mut guard = self.records.lock().expect("services mutex poisoned");
        let service = guard
            .iter_mut()
            .find(|service| service.id == id)
            .ok_or_else(|| StoreError::not_found("service", id))?;
        patch.apply_to(service);
        Ok(service.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("services mutex poisoned");
        let before = guard.len();
        guard.retain(|service| service.id != id);
        if guard.len() == before {
            return Err(StoreError::not_found("service", id));
        }
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryBookings {
    records: Arc<Mutex<Vec<Booking>>>,
}

#[async_trait]
impl BookingStore for InMemoryBookings {
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

#[derive(Default, Clone)]
pub(crate) struct InMemoryLedger {
    earnings: Arc<Mutex<Vec<Earning>>>,
    transactions: Arc<Mutex<Vec<Transaction>>>,
}

#[async_trait]
impl LedgerStore for InMemoryLedger {
    async fn earning_for_partner(&self, partner_id: &str) -> Result<Option<Earning>, StoreError> {
        let guard = self.earnings.lock().expect("earnings mutex poisoned");
        Ok(guard
            .iter()
            .find(|earning| earning.partner_id == partner_id)
            .cloned())
    }

    async fn create_earning(&self, earning: Earning) -> Result<Earning, StoreError> {
        let mut guard = self.earnings.lock().expect("earnings mutex poisoned");
        if guard.iter().any(|existing| existing.id == earning.id) {
            return Err(StoreError::conflict("earning", earning.id));
        }
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

#[derive(Default, Clone)]
pub(crate) struct InMemoryPortfolio {
    records: Arc<Mutex<Vec<Portfolio>>>,
}

#[async_trait]
impl PortfolioStore for InMemoryPortfolio {
    async fn list(&self) -> Result<Vec<Portfolio>, StoreError> {
        Ok(self.records.lock().expect("portfolio mutex poisoned").clone())
    }

    async fn by_partner(&self, partner_id: &str) -> Result<Vec<Portfolio>, StoreError> {
        let guard = self.records.lock().expect("portfolio mutex poisoned");
        Ok(guard
            .iter()
            .filter(|item| item.partner_id == partner_id)
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Portfolio, StoreError> {
        let guard = self.records.lock().expect("portfolio mutex poisoned");
        guard
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("portfolio", id))
    }

    async fn create(&self, item: Portfolio) -> Result<Portfolio, StoreError> {
        let mut guard = self.records.lock().expect("portfolio mutex poisoned");
        if guard.iter().any(|existing| existing.id == item.id) {
            return Err(StoreError::conflict("portfolio", item.id));
        }
        guard.push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: &str, patch: PortfolioUpdate) -> Result<Portfolio, StoreError> {
        let mut guard = self.records.lock().expect("portfolio mutex poisoned");
        let item = guard
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| StoreError::not_found("portfolio", id))?;
        patch.apply_to(item);
        Ok(item.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("portfolio mutex poisoned");
        let before = guard.len();
        guard.retain(|item| item.id != id);
        if guard.len() == before {
            return Err(StoreError::not_found("portfolio", id));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub(crate) struct InMemoryCategories {
    records: Arc<Vec<Category>>,
}

impl Default for InMemoryCategories {
    fn default() -> Self {
        Self {
            records: Arc::new(default_categories()),
        }
    }
}

#[async_trait]
impl CategoryStore for InMemoryCategories {
    async fn list(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.records.as_ref().clone())
    }

    async fn get(&self, id: &str) -> Result<Category, StoreError> {
        self.records
            .iter()
            .find(|category| category.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("category", id))
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySession {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl SessionStore for InMemorySession {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .entries
            .lock()
            .expect("session mutex poisoned")
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries
            .lock()
            .expect("session mutex poisoned")
            .insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .expect("session mutex poisoned")
            .remove(key);
        Ok(())
    }
}

fn default_categories() -> Vec<Category> {
    [
        ("cat-cleaning", "Cleaning"),
        ("cat-plumbing", "Plumbing"),
        ("cat-electrical", "Electrical"),
        ("cat-painting", "Painting"),
        ("cat-carpentry", "Carpentry"),
    ]
    .into_iter()
    .map(|(id, name)| Category {
        id: id.to_string(),
        name: name.to_string(),
    })
    .collect()
}
