use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::marketplace::portfolio::{
    Portfolio, PortfolioCreate, PortfolioService, PortfolioUpdate,
};
use crate::store::{PortfolioStore, StoreError};

/// In-memory `portfolio` collection.
#[derive(Default, Clone)]
pub(super) struct MemoryPortfolio {
    pub(super) records: Arc<Mutex<Vec<Portfolio>>>,
}

impl MemoryPortfolio {
    pub(super) fn with_records(records: Vec<Portfolio>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }
}

#[async_trait]
impl PortfolioStore for MemoryPortfolio {
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

pub(super) fn gallery() -> (PortfolioService<MemoryPortfolio>, MemoryPortfolio) {
    let store = MemoryPortfolio::default();
    (
        PortfolioService::new(Arc::new(store.clone())),
        store,
    )
}

pub(super) fn item(id: &str, partner_id: &str) -> Portfolio {
    Portfolio {
        id: id.to_string(),
        partner_id: partner_id.to_string(),
        image_url: format!("https://cdn.urbanfix.example/{id}.jpg"),
        caption: "Before and after".to_string(),
    }
}

pub(super) fn create_input(partner_id: &str) -> PortfolioCreate {
    PortfolioCreate {
        partner_id: partner_id.to_string(),
        image_url: "https://cdn.urbanfix.example/kitchen.jpg".to_string(),
        caption: "Modular kitchen refit".to_string(),
    }
}
