use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::config::PolicyConfig;
use crate::marketplace::ledger::{EarningsLedger, LedgerError};
use crate::store::{BookingStore, LedgerStore, StoreError};
use crate::sync::KeyedLocks;

use super::domain::{
    Booking, BookingCreate, BookingPatch, BookingStatus, CompletionContext,
};

/// Booking lifecycle coordinator.
///
/// Status changes for one booking are serialized under its keyed lock so a
/// double-submit cannot validate the same edge twice. Completing a booking
/// credits the partner through the ledger; that is the only cross-module
/// write.
pub struct BookingManager<S, L> {
    store: Arc<S>,
    ledger: Arc<EarningsLedger<L>>,
    policy: PolicyConfig,
    locks: KeyedLocks<String>,
}

impl<S, L> BookingManager<S, L>
where
    S: BookingStore + 'static,
    L: LedgerStore + 'static,
{
    pub fn new(store: Arc<S>, ledger: Arc<EarningsLedger<L>>, policy: PolicyConfig) -> Self {
        Self {
            store,
            ledger,
            policy,
            locks: KeyedLocks::new(),
        }
    }

    /// Book a service. The price snapshot comes from the caller; the
    /// convenience fee is stamped from policy and frozen on the record.
    pub async fn create(&self, input: BookingCreate) -> Result<Booking, BookingError> {
        if !input.price.is_finite() || input.price < 0.0 {
            return Err(BookingError::Validation(
                "price must be a non-negative number".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&input.offer_discount) {
            return Err(BookingError::Validation(
                "offer discount must be between 0 and 100".to_string(),
            ));
        }

        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            user_id: input.user_id,
            service_id: input.service_id,
            price: input.price,
            offer_discount: input.offer_discount,
            convenience_fee: self.policy.convenience_fee,
            status: BookingStatus::Confirmed,
            schedule: input.schedule,
            address: input.address,
            special_instructions: input.special_instructions,
            created_at: Utc::now(),
            completed_at: None,
            cancelled_at: None,
        };
        let created = self.store.create(booking).await?;
        info!(booking_id = %created.id, service_id = %created.service_id, "booking created");
        Ok(created)
    }

    pub async fn get(&self, id: &str) -> Result<Booking, BookingError> {
        Ok(self.store.get(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<Booking>, BookingError> {
        Ok(self.store.list().await?)
    }

    pub async fn by_user(&self, user_id: &str) -> Result<Vec<Booking>, BookingError> {
        Ok(self.store.by_user(user_id).await?)
    }

    /// Move a booking along the lifecycle.
    ///
    /// Completion requires the resolved context and is the transition that
    /// writes the earning entry. Terminal timestamps are set exactly once,
    /// on the edge that reaches them.
    pub async fn transition(
        &self,
        id: &str,
        target: BookingStatus,
        context: Option<CompletionContext>,
    ) -> Result<Booking, BookingError> {
        let _guard = self.locks.acquire(&id.to_string()).await;

        let booking = self.store.get(id).await?;
        if !booking.status.can_transition_to(target) {
            return Err(BookingError::InvalidTransition {
                from: booking.status,
                to: target,
            });
        }

        let mut patch = BookingPatch {
            status: Some(target),
            ..BookingPatch::default()
        };
        match target {
            BookingStatus::Completed => patch.completed_at = Some(Utc::now()),
            BookingStatus::Cancelled => patch.cancelled_at = Some(Utc::now()),
            _ => {}
        }

        if target == BookingStatus::Completed {
            let Some(context) = context else {
                return Err(BookingError::Validation(
                    "completion requires the partner and resolved names".to_string(),
                ));
            };
            // credit before the terminal write: a failed status update leaves
            // the booking retryable, and the ledger holds at most one earning
            // per booking id
            self.ledger
                .record_earning(
                    &context.partner_id,
                    id,
                    booking.price,
                    booking.offer_discount,
                    context.service_name,
                    context.customer_name,
                )
                .await?;
            let updated = self.store.update(id, patch).await?;
            info!(booking_id = %id, status = target.label(), "booking completed");
            return Ok(updated);
        }

        let updated = self.store.update(id, patch).await?;
        info!(booking_id = %id, status = target.label(), "booking transitioned");
        Ok(updated)
    }

    pub async fn start(&self, id: &str) -> Result<Booking, BookingError> {
        self.transition(id, BookingStatus::InProgress, None).await
    }

    pub async fn complete(
        &self,
        id: &str,
        context: CompletionContext,
    ) -> Result<Booking, BookingError> {
        self.transition(id, BookingStatus::Completed, Some(context))
            .await
    }

    pub async fn cancel(&self, id: &str) -> Result<Booking, BookingError> {
        self.transition(id, BookingStatus::Cancelled, None).await
    }
}

/// Error raised by booking operations.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("cannot transition booking from {} to {}", from.label(), to.label())]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BookingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BookingError::InvalidTransition { .. } => StatusCode::CONFLICT,
            BookingError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BookingError::Ledger(error) => error.status_code(),
            BookingError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            BookingError::Store(StoreError::Conflict { .. }) => StatusCode::CONFLICT,
            BookingError::Store(StoreError::Unavailable(_)) => StatusCode::BAD_GATEWAY,
        }
    }
}
