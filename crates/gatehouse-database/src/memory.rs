//! In-memory user store backed by a concurrent map.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;
use gatehouse_entity::user::{CreateUser, User};

use crate::store::UserStore;

/// Process-local [`UserStore`]. Contents are lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<DashMap<String, User>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        // The entry guard holds the shard lock, so check-and-insert is atomic.
        match self.users.entry(data.username.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Username '{}' already exists",
                data.username
            ))),
            Entry::Vacant(slot) => {
                let user = User {
                    id: Uuid::now_v7(),
                    username: data.username.clone(),
                    password_hash: data.password_hash.clone(),
                    created_at: Utc::now(),
                };
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }

    async fn find_by_username(&self, username: &str) -> AppResult<User> {
        self.users
            .get(username)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.users.len() as u64)
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}
