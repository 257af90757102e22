use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle states for a booking.
///
/// Transitions are one-directional: Confirmed → InProgress → Completed,
/// with Cancelled reachable from the two non-terminal states. Completed and
/// Cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// Whether `self → target` is a legal edge. Skipping InProgress is not.
    pub fn can_transition_to(self, target: BookingStatus) -> bool {
        matches!(
            (self, target),
            (BookingStatus::Confirmed, BookingStatus::InProgress)
                | (BookingStatus::Confirmed, BookingStatus::Cancelled)
                | (BookingStatus::InProgress, BookingStatus::Completed)
                | (BookingStatus::InProgress, BookingStatus::Cancelled)
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in-progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

/// One booked job.
///
/// `price`, `offer_discount`, and `convenience_fee` are frozen at creation;
/// later catalog edits never reprice an existing booking. At most one of
/// the terminal timestamps is ever set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub service_id: String,
    pub price: f64,
    /// Percentage discount captured from the listing's offer.
    pub offer_discount: f64,
    pub convenience_fee: f64,
    pub status: BookingStatus,
    pub schedule: DateTime<Utc>,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// Checkout payload; the manager supplies id, fee, status, and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreate {
    pub user_id: String,
    pub service_id: String,
    pub price: f64,
    pub offer_discount: f64,
    pub schedule: DateTime<Utc>,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

/// Partial update applied on a status change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// Resolved names handed in when completing a booking. The booking record
/// stores only ids; the earning entry wants display names and the partner
/// to credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionContext {
    pub partner_id: String,
    pub service_name: String,
    pub customer_name: String,
}

/// Status shortcut used by the booking list tabs. `None` means "all".
pub fn filter_by_status(bookings: &[Booking], status: Option<BookingStatus>) -> Vec<Booking> {
    match status {
        None => bookings.to_vec(),
        Some(status) => bookings
            .iter()
            .filter(|booking| booking.status == status)
            .cloned()
            .collect(),
    }
}

/// Amount the customer pays: discounted price plus the convenience fee,
/// computed from the frozen snapshot fields only.
pub fn final_amount(booking: &Booking) -> f64 {
    crate::marketplace::catalog::booking_final_amount(
        booking.price,
        booking.offer_discount,
        booking.convenience_fee,
    )
}
