use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::BankAccount;

/// The singular earnings record for one partner.
///
/// `earnings` is the lifetime total from completed bookings and only ever
/// grows; `balance` is what the partner can withdraw right now, so payouts
/// reduce it without touching `earnings`. An empty `id` marks a record that
/// exists only in memory and has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Earning {
    pub id: String,
    pub partner_id: String,
    pub earnings: f64,
    pub balance: f64,
}

impl Earning {
    /// Zero-valued record for a partner with no history.
    pub fn empty(partner_id: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            partner_id: partner_id.into(),
            earnings: 0.0,
            balance: 0.0,
        }
    }

    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Ledger entry kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Earning,
    Payout,
}

/// One immutable ledger entry. Earning entries reference the booking they
/// came from; payout entries carry the bank-account snapshot they were sent
/// to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub partner_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    /// Service name for earnings, "Payout to Bank" for payouts.
    pub title: String,
    /// Customer name for earnings, "Wallet" for payouts.
    #[serde(rename = "from")]
    pub counterpart: String,
    pub date_time: DateTime<Utc>,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_bank_account: Option<BankAccount>,
}

/// Withdrawal request submitted from the payout dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutRequest {
    pub partner_id: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<BankAccount>,
}

/// Aggregated view rendered on the earnings dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsSummary {
    pub total_earnings: f64,
    pub available_balance: f64,
    /// Payout transactions missing a bank-account snapshot.
    pub pending_payouts: usize,
    pub completed_bookings: usize,
    pub this_month_earnings: f64,
}
