use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a service is priced; the duration field is minutes for hourly
/// services and days for daily ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    Hourly,
    Daily,
}

impl PriceType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hourly => "Hourly",
            Self::Daily => "Daily",
        }
    }
}

/// A single customer rating embedded on a service. Ratings are append-only
/// history; they survive every partial update and are only removed when the
/// parent service is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRating {
    pub user_id: String,
    pub rating: f64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// A partner's service listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEntity {
    pub id: String,
    pub partner_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category_id: String,
    pub price_type: PriceType,
    pub price: f64,
    pub duration: u32,
    pub has_offer: bool,
    pub offer_title: String,
    /// Percentage 0-100; only meaningful while `has_offer` is set.
    pub offer_discount: f64,
    pub active: bool,
    #[serde(default)]
    pub ratings: Vec<ServiceRating>,
}

/// Payload for creating a service listing; the catalog assigns the id and
/// defaults `ratings` to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCreate {
    pub partner_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category_id: String,
    pub price_type: PriceType,
    pub price: f64,
    pub duration: u32,
    #[serde(default)]
    pub has_offer: bool,
    #[serde(default)]
    pub offer_title: String,
    #[serde(default)]
    pub offer_discount: f64,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub ratings: Vec<ServiceRating>,
}

fn default_active() -> bool {
    true
}

/// Partial update applied with PATCH semantics; absent fields are untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_type: Option<PriceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_offer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings: Option<Vec<ServiceRating>>,
}

impl ServiceUpdate {
    /// Fold this patch into an existing entity.
    pub fn apply_to(&self, service: &mut ServiceEntity) {
        if let Some(title) = &self.title {
            service.title = title.clone();
        }
        if let Some(description) = &self.description {
            service.description = Some(description.clone());
        }
        if let Some(category_id) = &self.category_id {
            service.category_id = category_id.clone();
        }
        if let Some(price_type) = self.price_type {
            service.price_type = price_type;
        }
        if let Some(price) = self.price {
            service.price = price;
        }
        if let Some(duration) = self.duration {
            service.duration = duration;
        }
        if let Some(has_offer) = self.has_offer {
            service.has_offer = has_offer;
        }
        if let Some(offer_title) = &self.offer_title {
            service.offer_title = offer_title.clone();
        }
        if let Some(offer_discount) = self.offer_discount {
            service.offer_discount = offer_discount;
        }
        if let Some(active) = self.active {
            service.active = active;
        }
        if let Some(ratings) = &self.ratings {
            service.ratings = ratings.clone();
        }
    }
}

/// A service enriched with the derived fields the listing UI renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedService {
    #[serde(flatten)]
    pub service: ServiceEntity,
    pub final_price: f64,
    pub average_rating: f64,
    pub total_reviews: usize,
}

/// Catalog category a service belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Rating input supplied by a customer when reviewing a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingInput {
    pub user_id: String,
    pub rating: f64,
    pub comment: String,
}
