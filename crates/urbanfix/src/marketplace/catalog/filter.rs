//! In-memory filter and sort engine for service collections.
//!
//! All criteria are optional and AND-combined; a criterion that is absent
//! matches everything, so an empty filter returns the input unchanged.

use super::domain::{PriceType, ServiceEntity};
use super::pricing::{average_rating, final_price};
use serde::{Deserialize, Serialize};

/// Filter criteria for searching the catalog. Price bounds are inclusive and
/// evaluated on the *final* (post-discount) price; the text query is a
/// case-insensitive substring match on the title only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_offer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_type: Option<PriceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
}

impl ServiceFilter {
    pub fn matches(&self, service: &ServiceEntity) -> bool {
        if let Some(category_id) = &self.category_id {
            if &service.category_id != category_id {
                return false;
            }
        }

        if let Some(partner_id) = &self.partner_id {
            if &service.partner_id != partner_id {
                return false;
            }
        }

        if let Some(active) = self.active {
            if service.active != active {
                return false;
            }
        }

        if let Some(has_offer) = self.has_offer {
            if service.has_offer != has_offer {
                return false;
            }
        }

        if let Some(price_type) = self.price_type {
            if service.price_type != price_type {
                return false;
            }
        }

        if self.price_min.is_some() || self.price_max.is_some() {
            let price = final_price(service);
            if let Some(min) = self.price_min {
                if price < min {
                    return false;
                }
            }
            if let Some(max) = self.price_max {
                if price > max {
                    return false;
                }
            }
        }

        if let Some(min_rating) = self.min_rating {
            if average_rating(&service.ratings) < min_rating {
                return false;
            }
        }

        if let Some(query) = &self.search_query {
            if !query.is_empty() {
                let needle = query.to_lowercase();
                if !service.title.to_lowercase().contains(&needle) {
                    return false;
                }
            }
        }

        true
    }
}

/// Supported catalog orderings. Ties keep the original collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceSort {
    PriceAsc,
    PriceDesc,
    RatingDesc,
}

/// Apply a filter, preserving the input order.
pub fn filter_services(services: &[ServiceEntity], filter: &ServiceFilter) -> Vec<ServiceEntity> {
    services
        .iter()
        .filter(|service| filter.matches(service))
        .cloned()
        .collect()
}

/// Sort a collection by the requested key. Uses a stable sort so equal keys
/// retain their relative order.
pub fn sort_services(services: &[ServiceEntity], sort: ServiceSort) -> Vec<ServiceEntity> {
    let mut sorted = services.to_vec();
    match sort {
        ServiceSort::PriceAsc => {
            sorted.sort_by(|a, b| final_price(a).total_cmp(&final_price(b)));
        }
        ServiceSort::PriceDesc => {
            sorted.sort_by(|a, b| final_price(b).total_cmp(&final_price(a)));
        }
        ServiceSort::RatingDesc => {
            sorted.sort_by(|a, b| {
                average_rating(&b.ratings).total_cmp(&average_rating(&a.ratings))
            });
        }
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marketplace::catalog::domain::ServiceRating;
    use chrono::Utc;

    fn service(id: &str, price: f64, discount: f64) -> ServiceEntity {
        ServiceEntity {
            id: id.to_string(),
            partner_id: "p-1".to_string(),
            title: format!("Deep Cleaning {id}"),
            description: None,
            category_id: "cat-clean".to_string(),
            price_type: PriceType::Hourly,
            price,
            duration: 60,
            has_offer: discount > 0.0,
            offer_title: String::new(),
            offer_discount: discount,
            active: true,
            ratings: Vec::new(),
        }
    }

    fn rated(mut base: ServiceEntity, values: &[f64]) -> ServiceEntity {
        base.ratings = values
            .iter()
            .map(|value| ServiceRating {
                user_id: "u-1".to_string(),
                rating: *value,
                comment: String::new(),
                created_at: Utc::now(),
            })
            .collect();
        base
    }

    #[test]
    fn empty_filter_returns_input_unchanged() {
        let services = vec![service("a", 100.0, 0.0), service("b", 200.0, 10.0)];
        let filtered = filter_services(&services, &ServiceFilter::default());
        assert_eq!(filtered, services);
    }

    #[test]
    fn price_bounds_use_final_price() {
        // 1000 with 20% off -> final 800
        let services = vec![service("a", 1000.0, 20.0)];

        let generous = ServiceFilter {
            price_max: Some(850.0),
            ..ServiceFilter::default()
        };
        assert_eq!(filter_services(&services, &generous).len(), 1);

        let tight = ServiceFilter {
            price_max: Some(750.0),
            ..ServiceFilter::default()
        };
        assert!(filter_services(&services, &tight).is_empty());
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let services = vec![service("a", 1000.0, 20.0)];
        let exact = ServiceFilter {
            price_min: Some(800.0),
            price_max: Some(800.0),
            ..ServiceFilter::default()
        };
        assert_eq!(filter_services(&services, &exact).len(), 1);
    }

    #[test]
    fn title_search_is_case_insensitive() {
        let services = vec![service("a", 100.0, 0.0)];
        let filter = ServiceFilter {
            search_query: Some("DEEP clean".to_string()),
            ..ServiceFilter::default()
        };
        assert_eq!(filter_services(&services, &filter).len(), 1);

        let miss = ServiceFilter {
            search_query: Some("plumbing".to_string()),
            ..ServiceFilter::default()
        };
        assert!(filter_services(&services, &miss).is_empty());
    }

    #[test]
    fn min_rating_filters_on_average() {
        let services = vec![
            rated(service("a", 100.0, 0.0), &[5.0, 4.0]),
            rated(service("b", 100.0, 0.0), &[2.0]),
        ];
        let filter = ServiceFilter {
            min_rating: Some(4.0),
            ..ServiceFilter::default()
        };
        let filtered = filter_services(&services, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "a");
    }

    #[test]
    fn criteria_are_and_combined() {
        let mut inactive = service("a", 100.0, 10.0);
        inactive.active = false;
        let services = vec![inactive, service("b", 100.0, 10.0)];

        let filter = ServiceFilter {
            has_offer: Some(true),
            active: Some(true),
            ..ServiceFilter::default()
        };
        let filtered = filter_services(&services, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "b");
    }

    #[test]
    fn price_sort_uses_final_price_and_is_stable() {
        let services = vec![
            service("a", 1000.0, 0.0),
            service("b", 1000.0, 20.0), // final 800
            service("c", 800.0, 0.0),   // ties with b
        ];

        let ascending = sort_services(&services, ServiceSort::PriceAsc);
        let ids: Vec<&str> = ascending.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);

        let descending = sort_services(&services, ServiceSort::PriceDesc);
        let ids: Vec<&str> = descending.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn rating_sort_is_descending() {
        let services = vec![
            rated(service("a", 100.0, 0.0), &[3.0]),
            rated(service("b", 100.0, 0.0), &[5.0]),
        ];
        let sorted = sort_services(&services, ServiceSort::RatingDesc);
        assert_eq!(sorted[0].id, "b");
    }
}
