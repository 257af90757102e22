//! Service catalog: listing CRUD, pricing calculations, filtering and
//! sorting, and the shared search feed.

pub mod domain;
pub mod filter;
pub mod pricing;
pub mod search;

mod router;
mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Category, EnrichedService, PriceType, RatingInput, ServiceCreate, ServiceEntity,
    ServiceRating, ServiceUpdate,
};
pub use filter::{filter_services, sort_services, ServiceFilter, ServiceSort};
pub use pricing::{
    average_rating, booking_final_amount, final_price, partner_net, rating_distribution,
    round1, round2, service_final_price, RatingDistribution,
};
pub use router::catalog_router;
pub use search::{SearchFeed, SearchState};
pub use service::{enrich, CatalogError, CatalogService};
