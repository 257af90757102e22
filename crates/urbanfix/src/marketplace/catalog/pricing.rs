//! Pure price and rating calculations.
//!
//! Two distinct discount paths exist on purpose: a service's displayed final
//! price is rounded to two decimals, while a booking's final amount is left
//! unrounded so the frozen snapshot arithmetic stays exact. Do not unify
//! them.

use super::domain::{ServiceEntity, ServiceRating};
use serde::Serialize;

/// Round to two decimal places (currency display).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to one decimal place (rating display).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Final listed price for a service after its promotional discount.
///
/// Without an active offer the base price is returned untouched (not even
/// rounded).
pub fn service_final_price(price: f64, has_offer: bool, offer_discount: f64) -> f64 {
    if has_offer && offer_discount > 0.0 {
        let discount = price * (offer_discount / 100.0);
        round2(price - discount)
    } else {
        price
    }
}

/// Convenience wrapper over [`service_final_price`].
pub fn final_price(service: &ServiceEntity) -> f64 {
    service_final_price(service.price, service.has_offer, service.offer_discount)
}

/// Amount the customer pays for a booking, computed from the snapshot values
/// frozen at checkout: discounted price plus the flat convenience fee.
pub fn booking_final_amount(price: f64, offer_discount: f64, convenience_fee: f64) -> f64 {
    let discount = price * (offer_discount / 100.0);
    price - discount + convenience_fee
}

/// The partner's share of a completed booking: the discounted price with the
/// convenience fee excluded (the platform keeps the fee).
pub fn partner_net(price: f64, offer_discount: f64) -> f64 {
    let discount = price * (offer_discount / 100.0);
    price - discount
}

/// Mean rating rounded to one decimal; 0.0 when there are no ratings.
pub fn average_rating(ratings: &[ServiceRating]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: f64 = ratings.iter().map(|r| r.rating).sum();
    round1(sum / ratings.len() as f64)
}

/// Star-bucket histogram over a set of ratings.
///
/// Bucketing floors each rating and clamps it into 1..=5 so fractional and
/// out-of-range values land in a deterministic bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RatingDistribution {
    #[serde(rename = "1")]
    pub one: u32,
    #[serde(rename = "2")]
    pub two: u32,
    #[serde(rename = "3")]
    pub three: u32,
    #[serde(rename = "4")]
    pub four: u32,
    #[serde(rename = "5")]
    pub five: u32,
    pub total: u32,
    pub average: f64,
}

pub fn rating_distribution(ratings: &[ServiceRating]) -> RatingDistribution {
    let mut distribution = RatingDistribution {
        average: average_rating(ratings),
        total: ratings.len() as u32,
        ..RatingDistribution::default()
    };

    for rating in ratings {
        let bucket = (rating.rating.floor() as i64).clamp(1, 5);
        match bucket {
            1 => distribution.one += 1,
            2 => distribution.two += 1,
            3 => distribution.three += 1,
            4 => distribution.four += 1,
            _ => distribution.five += 1,
        }
    }

    distribution
}
