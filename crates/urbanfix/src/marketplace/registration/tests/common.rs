use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::auth::{AuthService, User};
use crate::marketplace::catalog::{
    CatalogService, PriceType, ServiceEntity, ServiceUpdate,
};
use crate::marketplace::registration::{BasicInfo, RegistrationWizard, ServiceDraft};
use crate::store::{ServiceStore, SessionStore, StoreError, UserStore};

/// In-memory string key/value storage.
#[derive(Default, Clone)]
pub(super) struct MemorySession {
    pub(super) entries: Arc<Mutex<HashMap<String, String>>>,
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().expect("session mutex poisoned").get(key).cloned())
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

/// In-memory `users` collection.
#[derive(Default, Clone)]
pub(super) struct MemoryUsers {
    pub(super) records: Arc<Mutex<Vec<User>>>,
}

#[async_trait]
impl UserStore for MemoryUsers {
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
        self.records
            .lock()
            .expect("users mutex poisoned")
            .push(user.clone());
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

/// `services` collection that fails once a creation budget is spent, for
/// exercising partial submissions.
#[derive(Clone)]
pub(super) struct BudgetedServices {
    pub(super) records: Arc<Mutex<Vec<ServiceEntity>>>,
    creates_left: Arc<AtomicUsize>,
}

impl BudgetedServices {
    pub(super) fn unlimited() -> Self {
        Self::with_budget(usize::MAX)
    }

    pub(super) fn with_budget(creates: usize) -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            creates_left: Arc::new(AtomicUsize::new(creates)),
        }
    }
}

#[async_trait]
impl ServiceStore for BudgetedServices {
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
        let left = self.creates_left.load(Ordering::SeqCst);
        if left == 0 {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        if left != usize::MAX {
            self.creates_left.store(left - 1, Ordering::SeqCst);
        }
        self.records
            .lock()
            .expect("services mutex poisoned")
            .push(service.clone());
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

pub(super) fn wizard() -> (RegistrationWizard<MemorySession>, MemorySession) {
    let storage = MemorySession::default();
    (RegistrationWizard::new(Arc::new(storage.clone())), storage)
}

pub(super) fn auth_service() -> AuthService<MemoryUsers, MemorySession> {
    AuthService::new(
        Arc::new(MemoryUsers::default()),
        Arc::new(MemorySession::default()),
    )
}

pub(super) fn catalog(store: BudgetedServices) -> CatalogService<BudgetedServices> {
    CatalogService::new(Arc::new(store))
}

pub(super) fn basic_info() -> BasicInfo {
    BasicInfo {
        user_name: "Asha Pillai".to_string(),
        email: "asha@example.com".to_string(),
        phone_number: "9876543210".to_string(),
        password: "hunter2!X".to_string(),
        confirm_password: "hunter2!X".to_string(),
    }
}

pub(super) fn draft(title: &str) -> ServiceDraft {
    ServiceDraft {
        title: title.to_string(),
        description: "Thorough and insured".to_string(),
        price_type: PriceType::Hourly,
        price: 1000.0,
        duration: 120,
        has_offer: true,
        offer_title: "Monsoon offer".to_string(),
        offer_discount: 20.0,
    }
}
