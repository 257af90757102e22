use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::store::{BookingStore, LedgerStore};

use super::domain::{filter_by_status, BookingCreate, BookingStatus, CompletionContext};
use super::manager::{BookingError, BookingManager};

/// Router builder exposing the booking endpoints.
pub fn booking_router<S, L>(manager: Arc<BookingManager<S, L>>) -> Router
where
    S: BookingStore + 'static,
    L: LedgerStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/bookings",
            get(list_handler::<S, L>).post(create_handler::<S, L>),
        )
        .route("/api/v1/bookings/:booking_id", get(get_handler::<S, L>))
        .route(
            "/api/v1/bookings/:booking_id/status",
            post(transition_handler::<S, L>),
        )
        .with_state(manager)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListParams {
    user_id: Option<String>,
    status: Option<BookingStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransitionBody {
    status: BookingStatus,
    #[serde(default)]
    completion: Option<CompletionContext>,
}

fn error_response(error: &BookingError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (error.status_code(), axum::Json(payload)).into_response()
}

async fn list_handler<S, L>(
    State(manager): State<Arc<BookingManager<S, L>>>,
    Query(params): Query<ListParams>,
) -> Response
where
    S: BookingStore + 'static,
    L: LedgerStore + 'static,
{
    let listed = match params.user_id {
        Some(user_id) => manager.by_user(&user_id).await,
        None => manager.list().await,
    };
    match listed {
        Ok(bookings) => {
            let bookings = filter_by_status(&bookings, params.status);
            (StatusCode::OK, axum::Json(bookings)).into_response()
        }
        Err(error) => error_response(&error),
    }
}

async fn create_handler<S, L>(
    State(manager): State<Arc<BookingManager<S, L>>>,
    axum::Json(input): axum::Json<BookingCreate>,
) -> Response
where
    S: BookingStore + 'static,
    L: LedgerStore + 'static,
{
    match manager.create(input).await {
        Ok(booking) => (StatusCode::CREATED, axum::Json(booking)).into_response(),
        Err(error) => error_response(&error),
    }
}

async fn get_handler<S, L>(
    State(manager): State<Arc<BookingManager<S, L>>>,
    Path(booking_id): Path<String>,
) -> Response
where
    S: BookingStore + 'static,
    L: LedgerStore + 'static,
{
    match manager.get(&booking_id).await {
        Ok(booking) => (StatusCode::OK, axum::Json(booking)).into_response(),
        Err(error) => error_response(&error),
    }
}

async fn transition_handler<S, L>(
    State(manager): State<Arc<BookingManager<S, L>>>,
    Path(booking_id): Path<String>,
    axum::Json(body): axum::Json<TransitionBody>,
) -> Response
where
    S: BookingStore + 'static,
    L: LedgerStore + 'static,
{
    match manager
        .transition(&booking_id, body.status, body.completion)
        .await
    {
        Ok(booking) => (StatusCode::OK, axum::Json(booking)).into_response(),
        Err(error) => error_response(&error),
    }
}
