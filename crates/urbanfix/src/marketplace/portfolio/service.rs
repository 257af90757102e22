use std::sync::Arc;

use axum::http::StatusCode;
use tracing::info;
use uuid::Uuid;

use crate::store::{PortfolioStore, StoreError};

use super::domain::{Portfolio, PortfolioCreate, PortfolioUpdate};

/// Async facade over the `portfolio` collection.
pub struct PortfolioService<S> {
    store: Arc<S>,
}

impl<S> PortfolioService<S>
where
    S: PortfolioStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: PortfolioCreate) -> Result<Portfolio, PortfolioError> {
        if input.image_url.trim().is_empty() {
            return Err(PortfolioError::Validation(
                "image url is required".to_string(),
            ));
        }

        let item = Portfolio {
            id: Uuid::new_v4().to_string(),
            partner_id: input.partner_id,
            image_url: input.image_url,
            caption: input.caption,
        };

        let created = self.store.create(item).await?;
        info!(portfolio_id = %created.id, partner_id = %created.partner_id, "portfolio item added");
        Ok(created)
    }

    pub async fn get(&self, id: &str) -> Result<Portfolio, PortfolioError> {
        Ok(self.store.get(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<Portfolio>, PortfolioError> {
        Ok(self.store.list().await?)
    }

    pub async fn by_partner(&self, partner_id: &str) -> Result<Vec<Portfolio>, PortfolioError> {
        Ok(self.store.by_partner(partner_id).await?)
    }

    pub async fn update(
        &self,
        id: &str,
        patch: PortfolioUpdate,
    ) -> Result<Portfolio, PortfolioError> {
        if let Some(image_url) = &patch.image_url {
            if image_url.trim().is_empty() {
                return Err(PortfolioError::Validation(
                    "image url is required".to_string(),
                ));
            }
        }
        Ok(self.store.update(id, patch).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), PortfolioError> {
        self.store.delete(id).await?;
        info!(portfolio_id = %id, "portfolio item removed");
        Ok(())
    }
}

/// Error raised by portfolio operations.
#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PortfolioError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PortfolioError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PortfolioError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            PortfolioError::Store(StoreError::Conflict { .. }) => StatusCode::CONFLICT,
            PortfolioError::Store(StoreError::Unavailable(_)) => StatusCode::BAD_GATEWAY,
        }
    }
}
