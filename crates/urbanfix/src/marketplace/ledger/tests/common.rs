use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::auth::BankAccount;
use crate::config::PolicyConfig;
use crate::marketplace::ledger::domain::{Earning, Transaction};
use crate::marketplace::ledger::EarningsLedger;
use crate::store::{LedgerStore, StoreError};

/// In-memory `earnings` + `transactions` collections.
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

/// Store double that is permanently unreachable.
#[derive(Default, Clone)]
pub(super) struct UnavailableLedger;

#[async_trait]
impl LedgerStore for UnavailableLedger {
    async fn earning_for_partner(&self, _partner_id: &str) -> Result<Option<Earning>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn create_earning(&self, _earning: Earning) -> Result<Earning, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn update_earning(&self, _earning: Earning) -> Result<Earning, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn append_transaction(
        &self,
        _transaction: Transaction,
    ) -> Result<Transaction, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn transactions_for_partner(
        &self,
        _partner_id: &str,
    ) -> Result<Vec<Transaction>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

pub(super) fn ledger() -> (EarningsLedger<MemoryLedger>, MemoryLedger) {
    let store = MemoryLedger::default();
    (
        EarningsLedger::new(Arc::new(store.clone()), PolicyConfig::default()),
        store,
    )
}

pub(super) fn bank_account() -> BankAccount {
    BankAccount {
        account_holder: "Asha Pillai".to_string(),
        account_number: "0043218765".to_string(),
        ifsc: "UFIX0001234".to_string(),
        bank_name: "Union Fix Bank".to_string(),
    }
}
