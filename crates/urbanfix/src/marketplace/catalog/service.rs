use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::store::{ServiceStore, StoreError};

use super::domain::{
    EnrichedService, RatingInput, ServiceCreate, ServiceEntity, ServiceRating, ServiceUpdate,
};
use super::filter::{filter_services, sort_services, ServiceFilter, ServiceSort};
use super::pricing::{average_rating, final_price, rating_distribution, RatingDistribution};

/// Async facade over the `services` collection.
///
/// Pure calculation and filtering live in [`super::pricing`] and
/// [`super::filter`]; this type owns the persistence round-trips.
pub struct CatalogService<S> {
    store: Arc<S>,
}

impl<S> CatalogService<S>
where
    S: ServiceStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: ServiceCreate) -> Result<ServiceEntity, CatalogError> {
        if input.title.trim().is_empty() {
            return Err(CatalogError::Validation("title is required".to_string()));
        }
        if !(0.0..=100.0).contains(&input.offer_discount) {
            return Err(CatalogError::Validation(
                "offer discount must be between 0 and 100".to_string(),
            ));
        }

        let service = ServiceEntity {
            id: Uuid::new_v4().to_string(),
            partner_id: input.partner_id,
            title: input.title,
            description: input.description,
            category_id: input.category_id,
            price_type: input.price_type,
            price: input.price,
            duration: input.duration,
            has_offer: input.has_offer,
            offer_title: input.offer_title,
            offer_discount: input.offer_discount,
            active: input.active,
            ratings: input.ratings,
        };

        let created = self.store.create(service).await?;
        info!(service_id = %created.id, partner_id = %created.partner_id, "service created");
        Ok(created)
    }

    pub async fn get(&self, id: &str) -> Result<ServiceEntity, CatalogError> {
        Ok(self.store.get(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<ServiceEntity>, CatalogError> {
        Ok(self.store.list().await?)
    }

    pub async fn by_category(&self, category_id: &str) -> Result<Vec<ServiceEntity>, CatalogError> {
        Ok(self.store.by_category(category_id).await?)
    }

    pub async fn by_partner(&self, partner_id: &str) -> Result<Vec<ServiceEntity>, CatalogError> {
        Ok(self.store.by_partner(partner_id).await?)
    }

    pub async fn update(
        &self,
        id: &str,
        patch: ServiceUpdate,
    ) -> Result<ServiceEntity, CatalogError> {
        if let Some(discount) = patch.offer_discount {
            if !(0.0..=100.0).contains(&discount) {
                return Err(CatalogError::Validation(
                    "offer discount must be between 0 and 100".to_string(),
                ));
            }
        }
        Ok(self.store.update(id, patch).await?)
    }

    /// Soft delete: listings are toggled inactive instead of removed.
    pub async fn set_active(&self, id: &str, active: bool) -> Result<ServiceEntity, CatalogError> {
        let patch = ServiceUpdate {
            active: Some(active),
            ..ServiceUpdate::default()
        };
        Ok(self.store.update(id, patch).await?)
    }

    /// Append a rating to the service's embedded history.
    ///
    /// Read-modify-write on the ratings array; history is never truncated.
    pub async fn add_rating(
        &self,
        service_id: &str,
        input: RatingInput,
    ) -> Result<ServiceEntity, CatalogError> {
        if !(1.0..=5.0).contains(&input.rating) {
            return Err(CatalogError::Validation(
                "rating must be between 1 and 5".to_string(),
            ));
        }

        let service = self.store.get(service_id).await?;
        let mut ratings = service.ratings;
        ratings.push(ServiceRating {
            user_id: input.user_id,
            rating: input.rating,
            comment: input.comment,
            created_at: Utc::now(),
        });

        let patch = ServiceUpdate {
            ratings: Some(ratings),
            ..ServiceUpdate::default()
        };
        Ok(self.store.update(service_id, patch).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), CatalogError> {
        self.store.delete(id).await?;
        info!(service_id = %id, "service deleted");
        Ok(())
    }

    /// Filter and optionally sort the live collection, returning enriched
    /// records ready for rendering.
    pub async fn search(
        &self,
        filter: &ServiceFilter,
        sort: Option<ServiceSort>,
    ) -> Result<Vec<EnrichedService>, CatalogError> {
        let services = self.store.list().await?;
        let mut matched = filter_services(&services, filter);
        if let Some(sort) = sort {
            matched = sort_services(&matched, sort);
        }
        Ok(matched.into_iter().map(|service| enrich(&service)).collect())
    }

    pub async fn distribution(&self, id: &str) -> Result<RatingDistribution, CatalogError> {
        let service = self.store.get(id).await?;
        Ok(rating_distribution(&service.ratings))
    }
}

/// Attach the derived pricing/rating fields to a service.
pub fn enrich(service: &ServiceEntity) -> EnrichedService {
    EnrichedService {
        final_price: final_price(service),
        average_rating: average_rating(&service.ratings),
        total_reviews: service.ratings.len(),
        service: service.clone(),
    }
}

/// Error raised by catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CatalogError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            CatalogError::Store(StoreError::Conflict { .. }) => StatusCode::CONFLICT,
            CatalogError::Store(StoreError::Unavailable(_)) => StatusCode::BAD_GATEWAY,
        }
    }
}
