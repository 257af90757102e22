//! Booking lifecycle: creation with a frozen price snapshot, the status
//! state machine, and the joins that resolve display names.

pub mod domain;
pub mod join;

mod manager;
mod router;

#[cfg(test)]
mod tests;

pub use domain::{
    filter_by_status, final_amount, Booking, BookingCreate, BookingPatch, BookingStatus,
    CompletionContext,
};
pub use join::{booking_details, partner_bookings, BookingDetails};
pub use manager::{BookingError, BookingManager};
pub use router::booking_router;
