use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::auth::domain::{Address, RegisterInput, Role, User};
use crate::auth::{AuthService, ProfileService};
use crate::store::{SessionStore, StoreError, UserStore};

/// In-memory `users` collection.
#[derive(Default, Clone)]
pub(super) struct MemoryUsers {
    pub(super) records: Arc<Mutex<Vec<User>>>,
}

#[async_trait]
impl UserStore for MemoryUsers {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.records.lock().expect("users mutex poisoned").clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, StoreError> {
        let guard = self.records.lock().expect("users mutex poisoned");
        Ok(guard
            .iter()
            .filter(|user| user.email == email)
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> Result<User, StoreError> {
        let guard = self.records.lock().expect("users mutex poisoned");
        guard
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("user", id))
    }

    async fn create(&self, user: User) -> Result<User, StoreError> {
        let mut guard = self.records.lock().expect("users mutex poisoned");
        if guard.iter().any(|existing| existing.id == user.id) {
            return Err(StoreError::conflict("user", user.id));
        }
        guard.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, StoreError> {
        let mut guard = self.records.lock().expect("users mutex poisoned");
        let existing = guard
            .iter_mut()
            .find(|existing| existing.id == user.id)
            .ok_or_else(|| StoreError::not_found("user", user.id.clone()))?;
        *existing = user.clone();
        Ok(user)
    }
}

/// In-memory string key/value storage.
#[derive(Default, Clone)]
pub(super) struct MemorySession {
    pub(super) entries: Arc<Mutex<HashMap<String, String>>>,
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let guard = self.entries.lock().expect("session mutex poisoned");
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut guard = self.entries.lock().expect("session mutex poisoned");
        guard.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut guard = self.entries.lock().expect("session mutex poisoned");
        guard.remove(key);
        Ok(())
    }
}

pub(super) fn auth() -> (
    AuthService<MemoryUsers, MemorySession>,
    MemoryUsers,
    MemorySession,
) {
    let users = MemoryUsers::default();
    let storage = MemorySession::default();
    (
        AuthService::new(Arc::new(users.clone()), Arc::new(storage.clone())),
        users,
        storage,
    )
}

/// Profile service seeded with one stored partner record.
pub(super) fn profile() -> (ProfileService<MemoryUsers>, MemoryUsers) {
    let users = MemoryUsers::default();
    users
        .records
        .lock()
        .expect("users mutex poisoned")
        .push(stored_user("user-1"));
    (ProfileService::new(Arc::new(users.clone())), users)
}

pub(super) fn stored_user(id: &str) -> User {
    User {
        id: id.to_string(),
        user_name: "Asha Pillai".to_string(),
        phone_number: "9876543210".to_string(),
        role: Role::Partner,
        email: format!("{id}@example.com"),
        bio: None,
        addresses: Vec::new(),
        bank_account: None,
        service_areas: Vec::new(),
        password: Some("hunter2!".to_string()),
    }
}

pub(super) fn address(tag: &str) -> Address {
    Address {
        tag: tag.to_string(),
        street: "12 MG Road".to_string(),
        city: "Kochi".to_string(),
        state: "Kerala".to_string(),
        pincode: 682016,
    }
}

pub(super) fn register_input(email: &str, role: Role) -> RegisterInput {
    RegisterInput {
        user_name: "Asha Pillai".to_string(),
        phone_number: "9876543210".to_string(),
        role,
        email: email.to_string(),
        password: "hunter2!".to_string(),
        bio: None,
    }
}
