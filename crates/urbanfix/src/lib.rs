//! Domain and state core for the UrbanFix home-services marketplace.
//!
//! Customers browse and book services; partners manage listings, bookings,
//! and earnings. This crate owns the business rules (pricing, catalog
//! filtering, the booking lifecycle, the earnings ledger, partner
//! registration, and session state) behind persistence traits so the HTTP
//! service and tests can supply their own stores.

pub mod auth;
pub mod config;
pub mod error;
pub mod marketplace;
pub mod store;
pub mod sync;
pub mod telemetry;
