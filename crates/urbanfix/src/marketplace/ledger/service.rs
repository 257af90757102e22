use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{DateTime, Datelike, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::PolicyConfig;
use crate::marketplace::catalog::partner_net;
use crate::store::{LedgerStore, StoreError};
use crate::sync::KeyedLocks;

use super::domain::{
    Earning, EarningsSummary, PayoutRequest, Transaction, TransactionKind,
};

/// Ledger operations for partner earnings and payouts.
///
/// Every mutation runs under the partner's keyed lock: the backing store has
/// no optimistic-concurrency guard, so the balance read and the balance
/// write must not interleave across requests. Payouts are not idempotent and
/// are never retried here.
pub struct EarningsLedger<S> {
    store: Arc<S>,
    policy: PolicyConfig,
    locks: KeyedLocks<String>,
}

impl<S> EarningsLedger<S>
where
    S: LedgerStore + 'static,
{
    pub fn new(store: Arc<S>, policy: PolicyConfig) -> Self {
        Self {
            store,
            policy,
            locks: KeyedLocks::new(),
        }
    }

    /// The partner's ledger record, or a zero-valued one when none exists.
    /// The empty record is not persisted until the first mutation.
    pub async fn get_or_create(&self, partner_id: &str) -> Result<Earning, LedgerError> {
        let existing = self.store.earning_for_partner(partner_id).await?;
        Ok(existing.unwrap_or_else(|| Earning::empty(partner_id)))
    }

    /// Credit a completed booking to the partner.
    ///
    /// The partner's share is the discounted price with the convenience fee
    /// excluded. `title` and `counterpart` are the resolved service and
    /// customer names supplied by the caller. A booking is credited at most
    /// once: replaying the same booking id returns the existing transaction
    /// without touching the amounts.
    pub async fn record_earning(
        &self,
        partner_id: &str,
        booking_id: &str,
        gross_price: f64,
        offer_discount_pct: f64,
        title: String,
        counterpart: String,
    ) -> Result<Transaction, LedgerError> {
        let _guard = self.locks.acquire(&partner_id.to_string()).await;

        let prior = self
            .store
            .transactions_for_partner(partner_id)
            .await?
            .into_iter()
            .find(|transaction| {
                transaction.kind == TransactionKind::Earning
                    && transaction.booking_id.as_deref() == Some(booking_id)
            });
        if let Some(prior) = prior {
            info!(partner_id, booking_id, "earning already recorded");
            return Ok(prior);
        }

        let net = partner_net(gross_price, offer_discount_pct);
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            partner_id: partner_id.to_string(),
            booking_id: Some(booking_id.to_string()),
            title,
            counterpart,
            date_time: Utc::now(),
            amount: net,
            kind: TransactionKind::Earning,
            to_bank_account: None,
        };

        let stored = self.store.append_transaction(transaction).await?;
        self.apply_delta(partner_id, net, net).await?;
        info!(partner_id, booking_id, amount = net, "earning recorded");
        Ok(stored)
    }

    /// Withdraw from the partner's balance into their bank account.
    pub async fn request_payout(
        &self,
        request: PayoutRequest,
    ) -> Result<Transaction, LedgerError> {
        if !request.amount.is_finite() || request.amount <= 0.0 {
            return Err(LedgerError::Validation(
                "payout amount must be a positive number".to_string(),
            ));
        }
        // static policy bound, checked before any store round-trip
        if request.amount < self.policy.min_payout {
            return Err(LedgerError::BelowMinimumPayout {
                minimum: self.policy.min_payout,
            });
        }

        let _guard = self.locks.acquire(&request.partner_id).await;

        let earning = self.get_or_create(&request.partner_id).await?;
        if request.amount > earning.balance {
            warn!(
                partner_id = %request.partner_id,
                requested = request.amount,
                available = earning.balance,
                "payout rejected: insufficient balance"
            );
            return Err(LedgerError::InsufficientBalance {
                requested: request.amount,
                available: earning.balance,
            });
        }
        let Some(bank_account) = request.bank_account else {
            return Err(LedgerError::MissingBankAccount);
        };

        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            partner_id: request.partner_id.clone(),
            booking_id: None,
            title: "Payout to Bank".to_string(),
            counterpart: "Wallet".to_string(),
            date_time: Utc::now(),
            amount: request.amount,
            kind: TransactionKind::Payout,
            to_bank_account: Some(bank_account),
        };

        let stored = self.store.append_transaction(transaction).await?;
        self.apply_delta(&request.partner_id, 0.0, -request.amount)
            .await?;
        info!(partner_id = %request.partner_id, amount = request.amount, "payout requested");
        Ok(stored)
    }

    pub async fn transactions(&self, partner_id: &str) -> Result<Vec<Transaction>, LedgerError> {
        Ok(self.store.transactions_for_partner(partner_id).await?)
    }

    pub async fn payout_history(&self, partner_id: &str) -> Result<Vec<Transaction>, LedgerError> {
        let transactions = self.transactions(partner_id).await?;
        Ok(transactions
            .into_iter()
            .filter(|transaction| transaction.kind == TransactionKind::Payout)
            .collect())
    }

    /// Dashboard aggregate evaluated against the wall clock.
    pub async fn summarize(&self, partner_id: &str) -> Result<EarningsSummary, LedgerError> {
        self.summarize_at(partner_id, Utc::now()).await
    }

    /// [`Self::summarize`] with an injected clock so this-month windows are
    /// testable.
    pub async fn summarize_at(
        &self,
        partner_id: &str,
        now: DateTime<Utc>,
    ) -> Result<EarningsSummary, LedgerError> {
        let earning = self.get_or_create(partner_id).await?;
        let transactions = self.transactions(partner_id).await?;

        let this_month_earnings = transactions
            .iter()
            .filter(|transaction| transaction.kind == TransactionKind::Earning)
            .filter(|transaction| {
                transaction.date_time.month() == now.month()
                    && transaction.date_time.year() == now.year()
            })
            .map(|transaction| transaction.amount)
            .sum();

        let pending_payouts = transactions
            .iter()
            .filter(|transaction| {
                transaction.kind == TransactionKind::Payout
                    && transaction.to_bank_account.is_none()
            })
            .count();

        // each completed booking produced exactly one earning entry carrying
        // its booking id
        let completed_bookings = transactions
            .iter()
            .filter(|transaction| {
                transaction.kind == TransactionKind::Earning && transaction.booking_id.is_some()
            })
            .count();

        Ok(EarningsSummary {
            total_earnings: earning.earnings,
            available_balance: earning.balance,
            pending_payouts,
            completed_bookings,
            this_month_earnings,
        })
    }

    /// Read-modify-write of the amounts; callers hold the partner lock.
    /// Earnings only ever grow, balance moves by the signed delta.
    async fn apply_delta(
        &self,
        partner_id: &str,
        earned: f64,
        balance_delta: f64,
    ) -> Result<Earning, LedgerError> {
        let mut earning = self.get_or_create(partner_id).await?;
        earning.earnings += earned.max(0.0);
        earning.balance += balance_delta;

        let updated = if earning.is_persisted() {
            self.store.update_earning(earning).await?
        } else {
            earning.id = Uuid::new_v4().to_string();
            self.store.create_earning(earning).await?
        };
        Ok(updated)
    }
}

/// Error raised by ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("{0}")]
    Validation(String),
    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: f64, available: f64 },
    #[error("minimum payout amount is {minimum}")]
    BelowMinimumPayout { minimum: f64 },
    #[error("bank account details required")]
    MissingBankAccount,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LedgerError::Validation(_)
            | LedgerError::BelowMinimumPayout { .. }
            | LedgerError::MissingBankAccount => StatusCode::UNPROCESSABLE_ENTITY,
            LedgerError::InsufficientBalance { .. } => StatusCode::CONFLICT,
            LedgerError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            LedgerError::Store(StoreError::Conflict { .. }) => StatusCode::CONFLICT,
            LedgerError::Store(StoreError::Unavailable(_)) => StatusCode::BAD_GATEWAY,
        }
    }
}
