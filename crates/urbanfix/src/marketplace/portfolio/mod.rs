//! Partner portfolio: the gallery of work samples rendered on a partner's
//! public profile.

pub mod domain;

mod router;
mod service;

#[cfg(test)]
mod tests;

pub use domain::{Portfolio, PortfolioCreate, PortfolioUpdate};
pub use router::portfolio_router;
pub use service::{PortfolioError, PortfolioService};
