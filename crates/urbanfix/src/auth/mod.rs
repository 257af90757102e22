//! Authentication and session state: registration, login, logout,
//! rehydration from persisted storage, and profile management.

pub mod domain;

mod profile;
mod router;
mod service;
mod session;

#[cfg(test)]
mod tests;

pub use domain::{
    Address, AuthResponse, BankAccount, LoginInput, RegisterInput, Role, User,
};
pub use profile::ProfileService;
pub use router::{auth_router, profile_router};
pub use service::{require_role, AuthError, AuthService, TOKEN_KEY, USER_KEY};
pub use session::{AuthState, SessionHandle};
