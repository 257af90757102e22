//! Partner registration: the persisted three-step wizard and the
//! submission that turns a finished wizard into an account plus listings.

pub mod domain;

mod submit;
mod wizard;

#[cfg(test)]
mod tests;

pub use domain::{BasicInfo, RegistrationState, ServiceDraft};
pub use submit::{submit_registration, RegistrationError, SubmitOutcome};
pub use wizard::{RegistrationWizard, STORAGE_KEY};
