use crate::infra::{
    AppState, InMemoryBookings, InMemoryCategories, InMemoryLedger, InMemoryPortfolio,
    InMemoryServices, InMemorySession, InMemoryUsers,
};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use urbanfix::auth::{auth_router, profile_router, AuthService, ProfileService};
use urbanfix::error::AppError;
use urbanfix::marketplace::bookings::{
    booking_details, booking_router, partner_bookings, BookingDetails, BookingManager,
};
use urbanfix::marketplace::catalog::{catalog_router, Category, CatalogService};
use urbanfix::marketplace::ledger::{ledger_router, EarningsLedger};
use urbanfix::marketplace::portfolio::{portfolio_router, PortfolioService};
use urbanfix::store::{CategoryStore, UserStore};

/// Everything the HTTP surface needs, wired over the in-memory stores.
#[derive(Clone)]
pub(crate) struct Services {
    pub(crate) auth: Arc<AuthService<InMemoryUsers, InMemorySession>>,
    pub(crate) profile: Arc<ProfileService<InMemoryUsers>>,
    pub(crate) catalog: Arc<CatalogService<InMemoryServices>>,
    pub(crate) bookings: Arc<BookingManager<InMemoryBookings, InMemoryLedger>>,
    pub(crate) ledger: Arc<EarningsLedger<InMemoryLedger>>,
    pub(crate) portfolio: Arc<PortfolioService<InMemoryPortfolio>>,
    pub(crate) categories: Arc<InMemoryCategories>,
    pub(crate) users: Arc<InMemoryUsers>,
}

/// Wire every service over fresh in-memory stores.
pub(crate) fn build_services(policy: urbanfix::config::PolicyConfig) -> Services {
    let users = Arc::new(InMemoryUsers::default());
    let session = Arc::new(InMemorySession::default());
    let listings = Arc::new(InMemoryServices::default());
    let bookings = Arc::new(InMemoryBookings::default());
    let ledger_store = Arc::new(InMemoryLedger::default());

    let ledger = Arc::new(EarningsLedger::new(ledger_store, policy));
    Services {
        auth: Arc::new(AuthService::new(users.clone(), session)),
        profile: Arc::new(ProfileService::new(users.clone())),
        catalog: Arc::new(CatalogService::new(listings)),
        bookings: Arc::new(BookingManager::new(bookings, ledger.clone(), policy)),
        ledger,
        portfolio: Arc::new(PortfolioService::new(Arc::new(InMemoryPortfolio::default()))),
        categories: Arc::new(InMemoryCategories::default()),
        users,
    }
}

pub(crate) fn marketplace_routes(services: Services) -> axum::Router {
    let join_routes = axum::Router::new()
        .route("/api/v1/categories", axum::routing::get(categories_endpoint))
        .route(
            "/api/v1/bookings/details",
            axum::routing::get(booking_details_endpoint),
        )
        .route(
            "/api/v1/partners/:partner_id/bookings",
            axum::routing::get(partner_bookings_endpoint),
        )
        .with_state(services.clone());

    auth_router(services.auth.clone())
        .merge(profile_router(services.profile.clone()))
        .merge(catalog_router(services.catalog.clone()))
        .merge(booking_router(services.bookings.clone()))
        .merge(ledger_router(services.ledger))
        .merge(portfolio_router(services.portfolio.clone()))
        .merge(join_routes)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn categories_endpoint(
    State(services): State<Services>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = services.categories.list().await?;
    Ok(Json(categories))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookingDetailsParams {
    user_id: Option<String>,
}

/// Bookings joined against services and users for the list screens.
async fn booking_details_endpoint(
    State(services): State<Services>,
    Query(params): Query<BookingDetailsParams>,
) -> Result<Json<Vec<BookingDetails>>, AppError> {
    let bookings = match params.user_id {
        Some(user_id) => services.bookings.by_user(&user_id).await?,
        None => services.bookings.list().await?,
    };
    let listings = services.catalog.list().await?;
    let users = services.users.list().await?;
    Ok(Json(booking_details(&bookings, &listings, &users)))
}

/// A partner's bookings, derived by joining through their listings.
async fn partner_bookings_endpoint(
    State(services): State<Services>,
    Path(partner_id): Path<String>,
) -> Result<Json<Vec<urbanfix::marketplace::bookings::Booking>>, AppError> {
    let bookings = services.bookings.list().await?;
    let listings = services.catalog.list().await?;
    Ok(Json(partner_bookings(&bookings, &listings, &partner_id)))
}
