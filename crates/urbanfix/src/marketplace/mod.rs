//! Marketplace feature modules: the service catalog, the booking lifecycle,
//! the partner earnings ledger, the partner portfolio, and the partner
//! registration wizard.

pub mod bookings;
pub mod catalog;
pub mod ledger;
pub mod portfolio;
pub mod registration;
