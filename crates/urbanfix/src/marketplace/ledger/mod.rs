//! Partner earnings ledger: the cumulative-earnings/withdrawable-balance
//! pair plus its append-only transaction history.

pub mod domain;

mod router;
mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Earning, EarningsSummary, PayoutRequest, Transaction, TransactionKind,
};
pub use router::ledger_router;
pub use service::{EarningsLedger, LedgerError};
