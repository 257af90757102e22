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

use crate::store::ServiceStore;

use super::domain::{RatingInput, ServiceCreate, ServiceUpdate};
use super::filter::{ServiceFilter, ServiceSort};
use super::service::{enrich, CatalogError, CatalogService};

/// Router builder exposing the catalog endpoints.
pub fn catalog_router<S>(service: Arc<CatalogService<S>>) -> Router
where
    S: ServiceStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/services",
            get(search_handler::<S>).post(create_handler::<S>),
        )
        .route(
            "/api/v1/services/:service_id",
            get(get_handler::<S>)
                .patch(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .route(
            "/api/v1/services/:service_id/ratings",
            get(distribution_handler::<S>).post(rate_handler::<S>),
        )
        .with_state(service)
}

/// Query-string view of [`ServiceFilter`] plus the sort key.
///
/// Kept flat (no `serde(flatten)`) so the urlencoded deserializer handles
/// the numeric fields.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchParams {
    category_id: Option<String>,
    partner_id: Option<String>,
    price_min: Option<f64>,
    price_max: Option<f64>,
    has_offer: Option<bool>,
    active: Option<bool>,
    price_type: Option<super::domain::PriceType>,
    min_rating: Option<f64>,
    q: Option<String>,
    sort: Option<ServiceSort>,
}

impl SearchParams {
    fn into_parts(self) -> (ServiceFilter, Option<ServiceSort>) {
        let filter = ServiceFilter {
            category_id: self.category_id,
            partner_id: self.partner_id,
            price_min: self.price_min,
            price_max: self.price_max,
            has_offer: self.has_offer,
            active: self.active,
            price_type: self.price_type,
            min_rating: self.min_rating,
            search_query: self.q,
        };
        (filter, self.sort)
    }
}

fn error_response(error: &CatalogError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (error.status_code(), axum::Json(payload)).into_response()
}

async fn search_handler<S>(
    State(service): State<Arc<CatalogService<S>>>,
    Query(params): Query<SearchParams>,
) -> Response
where
    S: ServiceStore + 'static,
{
    let (filter, sort) = params.into_parts();
    match service.search(&filter, sort).await {
        Ok(results) => (StatusCode::OK, axum::Json(results)).into_response(),
        Err(error) => error_response(&error),
    }
}

async fn create_handler<S>(
    State(service): State<Arc<CatalogService<S>>>,
    axum::Json(input): axum::Json<ServiceCreate>,
) -> Response
where
    S: ServiceStore + 'static,
{
    match service.create(input).await {
        Ok(created) => (StatusCode::CREATED, axum::Json(created)).into_response(),
        Err(error) => error_response(&error),
    }
}

async fn get_handler<S>(
    State(service): State<Arc<CatalogService<S>>>,
    Path(service_id): Path<String>,
) -> Response
where
    S: ServiceStore + 'static,
{
    match service.get(&service_id).await {
        Ok(found) => (StatusCode::OK, axum::Json(enrich(&found))).into_response(),
        Err(error) => error_response(&error),
    }
}

async fn update_handler<S>(
    State(service): State<Arc<CatalogService<S>>>,
    Path(service_id): Path<String>,
    axum::Json(patch): axum::Json<ServiceUpdate>,
) -> Response
where
    S: ServiceStore + 'static,
{
    match service.update(&service_id, patch).await {
        Ok(updated) => (StatusCode::OK, axum::Json(updated)).into_response(),
        Err(error) => error_response(&error),
    }
}

async fn delete_handler<S>(
    State(service): State<Arc<CatalogService<S>>>,
    Path(service_id): Path<String>,
) -> Response
where
    S: ServiceStore + 'static,
{
    match service.delete(&service_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(&error),
    }
}

async fn rate_handler<S>(
    State(service): State<Arc<CatalogService<S>>>,
    Path(service_id): Path<String>,
    axum::Json(input): axum::Json<RatingInput>,
) -> Response
where
    S: ServiceStore + 'static,
{
    match service.add_rating(&service_id, input).await {
        Ok(updated) => (StatusCode::OK, axum::Json(updated)).into_response(),
        Err(error) => error_response(&error),
    }
}

async fn distribution_handler<S>(
    State(service): State<Arc<CatalogService<S>>>,
    Path(service_id): Path<String>,
) -> Response
where
    S: ServiceStore + 'static,
{
    match service.distribution(&service_id).await {
        Ok(distribution) => (StatusCode::OK, axum::Json(distribution)).into_response(),
        Err(error) => error_response(&error),
    }
}
