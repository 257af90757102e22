use std::sync::Arc;

use axum::http::StatusCode;
use tracing::{info, warn};
use uuid::Uuid;

use crate::store::{SessionStore, StoreError, UserStore};

use super::domain::{AuthResponse, LoginInput, RegisterInput, Role, User};
use super::session::{AuthState, SessionHandle};

/// Storage keys for the persisted session.
pub const TOKEN_KEY: &str = "urbanfix_token";
pub const USER_KEY: &str = "urbanfix_user";

/// Registration, login, and session lifecycle against the `users`
/// collection.
///
/// Storage writes and clears happen only here: populating storage on
/// register/login, clearing it on explicit logout. The session state itself
/// never touches storage, and a rehydration miss performs no side effects.
pub struct AuthService<U, T> {
    users: Arc<U>,
    storage: Arc<T>,
    session: SessionHandle,
}

impl<U, T> AuthService<U, T>
where
    U: UserStore + 'static,
    T: SessionStore + 'static,
{
    pub fn new(users: Arc<U>, storage: Arc<T>) -> Self {
        Self {
            users,
            storage,
            session: SessionHandle::new(),
        }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Create an account and establish a session for it.
    pub async fn register(&self, input: RegisterInput) -> Result<AuthResponse, AuthError> {
        let existing = self.users.find_by_email(&input.email).await?;
        if !existing.is_empty() {
            self.session.set_error("email already registered");
            return Err(AuthError::DuplicateEmail);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            user_name: input.user_name,
            phone_number: input.phone_number,
            role: input.role,
            email: input.email,
            bio: input.bio,
            addresses: Vec::new(),
            bank_account: None,
            service_areas: Vec::new(),
            password: Some(input.password),
        };
        let created = self.users.create(user).await?;
        let token = Uuid::new_v4().to_string();

        self.persist_session(&created, &token)?;
        self.session.set_authenticated(created.clone(), token.clone());
        info!(user_id = %created.id, role = created.role.label(), "account registered");
        Ok(AuthResponse {
            user: created,
            token,
        })
    }

    /// Check credentials and establish a session.
    ///
    /// A wrong email and a wrong password produce the same error. When the
    /// caller expects a role, a valid credential for the other role is
    /// rejected without starting a session.
    pub async fn login(&self, input: LoginInput) -> Result<AuthResponse, AuthError> {
        let matches = self.users.find_by_email(&input.email).await?;
        let Some(user) = matches.into_iter().next() else {
            self.session.set_error("invalid email or password");
            return Err(AuthError::InvalidCredentials);
        };
        if user.password.as_deref() != Some(input.password.as_str()) {
            self.session.set_error("invalid email or password");
            return Err(AuthError::InvalidCredentials);
        }
        if let Some(expected) = input.role {
            if user.role != expected {
                warn!(user_id = %user.id, expected = expected.label(), "login with wrong role");
                self.session
                    .set_error(format!("account is not a {}", expected.label()));
                return Err(AuthError::WrongRole { expected });
            }
        }

        let token = Uuid::new_v4().to_string();
        self.persist_session(&user, &token)?;
        self.session.set_authenticated(user.clone(), token.clone());
        info!(user_id = %user.id, "login");
        Ok(AuthResponse { user, token })
    }

    /// End the session and clear persisted credentials. This is the only
    /// place storage is cleared.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.session.clear();
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USER_KEY)?;
        info!("logout");
        Ok(())
    }

    /// Restore a persisted session if one exists.
    ///
    /// Returns whether a session was restored. Missing or unreadable
    /// entries leave the state untouched; a miss is not a logout.
    pub fn load_from_storage(&self) -> Result<bool, AuthError> {
        let token = self.storage.get(TOKEN_KEY)?;
        let raw_user = self.storage.get(USER_KEY)?;
        let (Some(token), Some(raw_user)) = (token, raw_user) else {
            return Ok(false);
        };
        let user: User = match serde_json::from_str(&raw_user) {
            Ok(user) => user,
            Err(error) => {
                warn!(%error, "stored session unreadable, ignoring");
                return Ok(false);
            }
        };
        self.session.set_authenticated(user, token);
        Ok(true)
    }

    fn persist_session(&self, user: &User, token: &str) -> Result<(), AuthError> {
        let serialized = serde_json::to_string(user)
            .map_err(|error| StoreError::Unavailable(format!("session write: {error}")))?;
        self.storage.set(TOKEN_KEY, token.to_string())?;
        self.storage.set(USER_KEY, serialized)?;
        Ok(())
    }
}

/// Route gate: the state must hold an authenticated user of the given role.
pub fn require_role(state: &AuthState, role: Role) -> Result<(), AuthError> {
    let Some(user) = state.user.as_ref().filter(|_| state.is_authenticated) else {
        return Err(AuthError::InvalidCredentials);
    };
    if user.role != role {
        return Err(AuthError::WrongRole { expected: role });
    }
    Ok(())
}

/// Error raised by auth operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("account is not a {}", expected.label())]
    WrongRole { expected: Role },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::DuplicateEmail => StatusCode::CONFLICT,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::WrongRole { .. } => StatusCode::FORBIDDEN,
            AuthError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AuthError::Store(StoreError::Conflict { .. }) => StatusCode::CONFLICT,
            AuthError::Store(StoreError::Unavailable(_)) => StatusCode::BAD_GATEWAY,
        }
    }
}
