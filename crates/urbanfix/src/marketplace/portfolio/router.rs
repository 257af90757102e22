use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::store::PortfolioStore;

use super::domain::{PortfolioCreate, PortfolioUpdate};
use super::service::{PortfolioError, PortfolioService};

/// Router builder exposing the portfolio endpoints.
pub fn portfolio_router<S>(service: Arc<PortfolioService<S>>) -> Router
where
    S: PortfolioStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/portfolio",
            get(list_handler::<S>).post(create_handler::<S>),
        )
        .route(
            "/api/v1/portfolio/:portfolio_id",
            get(get_handler::<S>)
                .patch(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListParams {
    partner_id: Option<String>,
}

fn error_response(error: &PortfolioError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (error.status_code(), axum::Json(payload)).into_response()
}

async fn list_handler<S>(
    State(service): State<Arc<PortfolioService<S>>>,
    Query(params): Query<ListParams>,
) -> Response
where
    S: PortfolioStore + 'static,
{
    let result = match params.partner_id {
        Some(partner_id) => service.by_partner(&partner_id).await,
        None => service.list().await,
    };
    match result {
        Ok(items) => (StatusCode::OK, axum::Json(items)).into_response(),
        Err(error) => error_response(&error),
    }
}

async fn create_handler<S>(
    State(service): State<Arc<PortfolioService<S>>>,
    axum::Json(input): axum::Json<PortfolioCreate>,
) -> Response
where
    S: PortfolioStore + 'static,
{
    match service.create(input).await {
        Ok(created) => (StatusCode::CREATED, axum::Json(created)).into_response(),
        Err(error) => error_response(&error),
    }
}

async fn get_handler<S>(
    State(service): State<Arc<PortfolioService<S>>>,
    Path(portfolio_id): Path<String>,
) -> Response
where
    S: PortfolioStore + 'static,
{
    match service.get(&portfolio_id).await {
        Ok(found) => (StatusCode::OK, axum::Json(found)).into_response(),
        Err(error) => error_response(&error),
    }
}

async fn update_handler<S>(
    State(service): State<Arc<PortfolioService<S>>>,
    Path(portfolio_id): Path<String>,
    axum::Json(patch): axum::Json<PortfolioUpdate>,
) -> Response
where
    S: PortfolioStore + 'static,
{
    match service.update(&portfolio_id, patch).await {
        Ok(updated) => (StatusCode::OK, axum::Json(updated)).into_response(),
        Err(error) => error_response(&error),
    }
}

async fn delete_handler<S>(
    State(service): State<Arc<PortfolioService<S>>>,
    Path(portfolio_id): Path<String>,
) -> Response
where
    S: PortfolioStore + 'static,
{
    match service.delete(&portfolio_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(&error),
    }
}
