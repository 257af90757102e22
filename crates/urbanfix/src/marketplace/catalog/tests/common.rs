use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::marketplace::catalog::domain::{
    PriceType, ServiceCreate, ServiceEntity, ServiceUpdate,
};
use crate::marketplace::catalog::CatalogService;
use crate::store::{ServiceStore, StoreError};

/// In-memory `services` collection mirroring the flat REST store.
#[derive(Default, Clone)]
pub(super) struct MemoryServices {
    pub(super) records: Arc<Mutex<Vec<ServiceEntity>>>,
}

impl MemoryServices {
    pub(super) fn with_records(records: Vec<ServiceEntity>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }
}

#[async_trait]
impl ServiceStore for MemoryServices {
    async fn list(&self) -> Result<Vec<ServiceEntity>, StoreError> {
        Ok(self.records.lock().expect("service mutex poisoned").clone())
    }

    async fn by_category(&self, category_id: &str) -> Result<Vec<ServiceEntity>, StoreError> {
        let guard = self.records.lock().expect("service mutex poisoned");
        Ok(guard
            .iter()
            .filter(|service| service.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn by_partner(&self, partner_id: &str) -> Result<Vec<ServiceEntity>, StoreError> {
        let guard = self.records.lock().expect("service mutex poisoned");
        Ok(guard
            .iter()
            .filter(|service| service.partner_id == partner_id)
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> Result<ServiceEntity, StoreError> {
        let guard = self.records.lock().expect("service mutex poisoned");
        guard
            .iter()
            .find(|service| service.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("service", id))
    }

    async fn create(&self, service: ServiceEntity) -> Result<ServiceEntity, StoreError> {
        let mut guard = self.records.lock().expect("service mutex poisoned");
        if guard.iter().any(|existing| existing.id == service.id) {
            return Err(StoreError::conflict("service", service.id));
        }
        guard.push(service.clone());
        Ok(service)
    }

    async fn update(&self, id: &str, patch: ServiceUpdate) -> Result<ServiceEntity, StoreError> {
        let mut guard = self.records.lock().expect("service mutex poisoned");
        let service = guard
            .iter_mut()
            .find(|service| service.id == id)
            .ok_or_else(|| StoreError::not_found("service", id))?;
        patch.apply_to(service);
        Ok(service.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("service mutex poisoned");
        let before = guard.len();
        guard.retain(|service| service.id != id);
        if guard.len() == before {
            return Err(StoreError::not_found("service", id));
        }
        Ok(())
    }
}

/// Store double whose every operation fails as unreachable.
#[derive(Default, Clone)]
pub(super) struct UnavailableServices;

#[async_trait]
impl ServiceStore for UnavailableServices {
    async fn list(&self) -> Result<Vec<ServiceEntity>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn by_category(&self, _category_id: &str) -> Result<Vec<ServiceEntity>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn by_partner(&self, _partner_id: &str) -> Result<Vec<ServiceEntity>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn get(&self, _id: &str) -> Result<ServiceEntity, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn create(&self, _service: ServiceEntity) -> Result<ServiceEntity, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn update(&self, _id: &str, _patch: ServiceUpdate) -> Result<ServiceEntity, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn delete(&self, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

pub(super) fn catalog() -> (CatalogService<MemoryServices>, MemoryServices) {
    let store = MemoryServices::default();
    (CatalogService::new(Arc::new(store.clone())), store)
}

pub(super) fn listing(id: &str, price: f64, discount: f64) -> ServiceEntity {
    ServiceEntity {
        id: id.to_string(),
        partner_id: "partner-1".to_string(),
        title: format!("Bathroom Deep Clean {id}"),
        description: None,
        category_id: "cat-cleaning".to_string(),
        price_type: PriceType::Hourly,
        price,
        duration: 120,
        has_offer: discount > 0.0,
        offer_title: if discount > 0.0 {
            "Monsoon offer".to_string()
        } else {
            String::new()
        },
        offer_discount: discount,
        active: true,
        ratings: Vec::new(),
    }
}

pub(super) fn create_input(title: &str) -> ServiceCreate {
    ServiceCreate {
        partner_id: "partner-1".to_string(),
        title: title.to_string(),
        description: Some("Two-hour visit".to_string()),
        category_id: "cat-cleaning".to_string(),
        price_type: PriceType::Hourly,
        price: 600.0,
        duration: 120,
        has_offer: false,
        offer_title: String::new(),
        offer_discount: 0.0,
        active: true,
        ratings: Vec::new(),
    }
}
