// src/db/preference_repo.rs

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::common::error::AppError;

/// Per-user key-value storage for dashboard state (current view, tab).
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn read_all(&self, user_id: Uuid) -> Result<BTreeMap<String, String>, AppError>;
    async fn write(&self, user_id: Uuid, key: &str, value: &str) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgPreferenceStore {
    pool: PgPool,
}

impl PgPreferenceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferenceStore for PgPreferenceStore {
    async fn read_all(&self, user_id: Uuid) -> Result<BTreeMap<String, String>, AppError> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT key, value FROM user_preferences WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().collect())
    }

    async fn write(&self, user_id: Uuid, key: &str, value: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO user_preferences (user_id, key, value)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, key)
            DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryPreferenceStore {
    entries: RwLock<HashMap<Uuid, BTreeMap<String, String>>>,
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn read_all(&self, user_id: Uuid) -> Result<BTreeMap<String, String>, AppError> {
        Ok(self.entries.read().await.get(&user_id).cloned().unwrap_or_default())
    }

    async fn write(&self, user_id: Uuid, key: &str, value: &str) -> Result<(), AppError> {
        self.entries
            .write()
            .await
            .entry(user_id)
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_store_keeps_users_apart() {
        let store = InMemoryPreferenceStore::default();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store.write(alice, "current_view", "customers").await.unwrap();
        store.write(alice, "current_view", "appointments").await.unwrap();
        store.write(bob, "current_tab", "today").await.unwrap();

        let a = store.read_all(alice).await.unwrap();
        assert_eq!(a.get("current_view").map(String::as_str), Some("appointments"));
        assert_eq!(a.len(), 1);
        assert!(store.read_all(Uuid::new_v4()).await.unwrap().is_empty());
    }
}
