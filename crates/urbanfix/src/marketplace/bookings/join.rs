use std::collections::HashMap;

use serde::Serialize;

use crate::auth::User;
use crate::marketplace::catalog::ServiceEntity;

use super::domain::{final_amount, Booking};

const MISSING_SERVICE: &str = "Unknown service";
const MISSING_PARTNER: &str = "Unknown partner";
const MISSING_USER: &str = "Unknown user";

/// Booking enriched with display names for the list screens.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub service_name: String,
    pub partner_name: String,
    pub user_name: String,
    pub final_amount: f64,
}

/// Three-way join of bookings against services and users.
///
/// A booking whose service or user no longer exists still renders, with
/// placeholder names; a dangling reference is display damage, not an error.
pub fn booking_details(
    bookings: &[Booking],
    services: &[ServiceEntity],
    users: &[User],
) -> Vec<BookingDetails> {
    let services_by_id: HashMap<&str, &ServiceEntity> = services
        .iter()
        .map(|service| (service.id.as_str(), service))
        .collect();
    let users_by_id: HashMap<&str, &User> =
        users.iter().map(|user| (user.id.as_str(), user)).collect();

    bookings
        .iter()
        .map(|booking| {
            let service = services_by_id.get(booking.service_id.as_str());
            let partner_name = service
                .and_then(|service| users_by_id.get(service.partner_id.as_str()))
                .map(|partner| partner.user_name.clone())
                .unwrap_or_else(|| MISSING_PARTNER.to_string());
            let service_name = service
                .map(|service| service.title.clone())
                .unwrap_or_else(|| MISSING_SERVICE.to_string());
            let user_name = users_by_id
                .get(booking.user_id.as_str())
                .map(|user| user.user_name.clone())
                .unwrap_or_else(|| MISSING_USER.to_string());

            BookingDetails {
                final_amount: final_amount(booking),
                booking: booking.clone(),
                service_name,
                partner_name,
                user_name,
            }
        })
        .collect()
}

/// Bookings belonging to a partner, derived by joining through the services
/// they own. Bookings are keyed by user and service only; the partner link
/// lives on the service record.
pub fn partner_bookings(
    bookings: &[Booking],
    services: &[ServiceEntity],
    partner_id: &str,
) -> Vec<Booking> {
    let owned: Vec<&str> = services
        .iter()
        .filter(|service| service.partner_id == partner_id)
        .map(|service| service.id.as_str())
        .collect();

    bookings
        .iter()
        .filter(|booking| owned.contains(&booking.service_id.as_str()))
        .cloned()
        .collect()
}
