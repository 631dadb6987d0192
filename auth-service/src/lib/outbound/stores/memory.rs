use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::User;
use crate::domain::auth::ports::UserStore;

/// In-memory credential store for tests and local runs.
///
/// Uniqueness is enforced inside a single write-lock critical section, so
/// concurrent inserts of the same username admit exactly one winner.
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get(&self, username: &str) -> Result<User, AuthError> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::StoreError("user map lock poisoned".to_string()))?;

        users
            .get(username)
            .cloned()
            .ok_or_else(|| AuthError::UserNotFound(username.to_string()))
    }

    async fn insert(&self, user: User) -> Result<User, AuthError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AuthError::StoreError("user map lock poisoned".to_string()))?;

        match users.entry(user.username.to_string()) {
            Entry::Occupied(_) => Err(AuthError::UserAlreadyExists(user.username.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }
}
