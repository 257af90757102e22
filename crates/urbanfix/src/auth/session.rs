use serde::Serialize;
use tokio::sync::watch;

use super::domain::User;

/// Observable authentication state.
///
/// `is_authenticated` is derived: it is true exactly when both `user` and
/// `token` are set, and nothing else flips it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub is_authenticated: bool,
}

/// Single owner of the mutable session state.
///
/// Mutation goes through the methods here; consumers either take a
/// [`snapshot`](Self::snapshot) or [`subscribe`](Self::subscribe) for
/// change notifications. No storage side effects happen in this type; the
/// auth service coordinates those.
pub struct SessionHandle {
    tx: watch::Sender<AuthState>,
}

impl SessionHandle {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(AuthState::default());
        Self { tx }
    }

    pub fn snapshot(&self) -> AuthState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.tx.subscribe()
    }

    /// Establish a session. Clears any previous error.
    pub fn set_authenticated(&self, user: User, token: String) {
        self.tx.send_replace(AuthState {
            user: Some(user),
            token: Some(token),
            error: None,
            is_authenticated: true,
        });
    }

    /// Record a failure message without touching authentication.
    pub fn set_error(&self, message: impl Into<String>) {
        self.tx.send_modify(|state| {
            state.error = Some(message.into());
        });
    }

    /// Back to the signed-out state.
    pub fn clear(&self) {
        self.tx.send_replace(AuthState::default());
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}
