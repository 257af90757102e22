use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::BankAccount;
use crate::store::LedgerStore;

use super::domain::PayoutRequest;
use super::service::{EarningsLedger, LedgerError};

/// Router builder exposing the partner earnings endpoints.
pub fn ledger_router<S>(ledger: Arc<EarningsLedger<S>>) -> Router
where
    S: LedgerStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/partners/:partner_id/earnings",
            get(summary_handler::<S>),
        )
        .route(
            "/api/v1/partners/:partner_id/transactions",
            get(transactions_handler::<S>),
        )
        .route(
            "/api/v1/partners/:partner_id/payouts",
            get(payout_history_handler::<S>).post(payout_handler::<S>),
        )
        .with_state(ledger)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PayoutBody {
    amount: f64,
    #[serde(default)]
    bank_account: Option<BankAccount>,
}

fn error_response(error: &LedgerError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (error.status_code(), axum::Json(payload)).into_response()
}

async fn summary_handler<S>(
    State(ledger): State<Arc<EarningsLedger<S>>>,
    Path(partner_id): Path<String>,
) -> Response
where
    S: LedgerStore + 'static,
{
    match ledger.summarize(&partner_id).await {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(&error),
    }
}

async fn transactions_handler<S>(
    State(ledger): State<Arc<EarningsLedger<S>>>,
    Path(partner_id): Path<String>,
) -> Response
where
    S: LedgerStore + 'static,
{
    match ledger.transactions(&partner_id).await {
        Ok(transactions) => (StatusCode::OK, axum::Json(transactions)).into_response(),
        Err(error) => error_response(&error),
    }
}

async fn payout_history_handler<S>(
    State(ledger): State<Arc<EarningsLedger<S>>>,
    Path(partner_id): Path<String>,
) -> Response
where
    S: LedgerStore + 'static,
{
    match ledger.payout_history(&partner_id).await {
        Ok(payouts) => (StatusCode::OK, axum::Json(payouts)).into_response(),
        Err(error) => error_response(&error),
    }
}

async fn payout_handler<S>(
    State(ledger): State<Arc<EarningsLedger<S>>>,
    Path(partner_id): Path<String>,
    axum::Json(body): axum::Json<PayoutBody>,
) -> Response
where
    S: LedgerStore + 'static,
{
    let request = PayoutRequest {
        partner_id,
        amount: body.amount,
        bank_account: body.bank_account,
    };
    match ledger.request_payout(request).await {
        Ok(transaction) => (StatusCode::CREATED, axum::Json(transaction)).into_response(),
        Err(error) => error_response(&error),
    }
}
