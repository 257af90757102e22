use crate::auth::AuthError;
use crate::config::ConfigError;
use crate::marketplace::bookings::BookingError;
use crate::marketplace::catalog::CatalogError;
use crate::marketplace::ledger::LedgerError;
use crate::marketplace::portfolio::PortfolioError;
use crate::marketplace::registration::RegistrationError;
use crate::store::StoreError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// Top-level error for binaries composing the marketplace core.
///
/// Feature modules keep their own typed errors; this enum exists so `main`
/// and the server bootstrap can propagate everything with `?`.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Store(StoreError),
    Catalog(CatalogError),
    Booking(BookingError),
    Ledger(LedgerError),
    Portfolio(PortfolioError),
    Auth(AuthError),
    Registration(RegistrationError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Store(err) => write!(f, "store error: {}", err),
            AppError::Catalog(err) => write!(f, "catalog error: {}", err),
            AppError::Booking(err) => write!(f, "booking error: {}", err),
            AppError::Ledger(err) => write!(f, "ledger error: {}", err),
            AppError::Portfolio(err) => write!(f, "portfolio error: {}", err),
            AppError::Auth(err) => write!(f, "auth error: {}", err),
            AppError::Registration(err) => write!(f, "registration error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Store(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Booking(err) => Some(err),
            AppError::Ledger(err) => Some(err),
            AppError::Portfolio(err) => Some(err),
            AppError::Auth(err) => Some(err),
            AppError::Registration(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Catalog(err) => err.status_code(),
            AppError::Booking(err) => err.status_code(),
            AppError::Ledger(err) => err.status_code(),
            AppError::Portfolio(err) => err.status_code(),
            AppError::Auth(err) => err.status_code(),
            AppError::Registration(err) => err.status_code(),
            AppError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::Conflict { .. }) => StatusCode::CONFLICT,
            AppError::Store(StoreError::Unavailable(_)) => StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<BookingError> for AppError {
    fn from(value: BookingError) -> Self {
        Self::Booking(value)
    }
}

impl From<LedgerError> for AppError {
    fn from(value: LedgerError) -> Self {
        Self::Ledger(value)
    }
}

impl From<PortfolioError> for AppError {
    fn from(value: PortfolioError) -> Self {
        Self::Portfolio(value)
    }
}

impl From<AuthError> for AppError {
    fn from(value: AuthError) -> Self {
        Self::Auth(value)
    }
}

impl From<RegistrationError> for AppError {
    fn from(value: RegistrationError) -> Self {
        Self::Registration(value)
    }
}
