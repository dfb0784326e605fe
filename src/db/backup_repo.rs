// src/db/backup_repo.rs

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::backup::{Backup, BackupSummary},
};

/// Tables captured in a snapshot, in restore-friendly order.
pub const SNAPSHOT_TABLES: [&str; 7] = [
    "staff",
    "customers",
    "services",
    "appointments",
    "inventory_items",
    "campaigns",
    "coupons",
];

/// A backup row about to be written. `created_at` falls back to `NOW()`.
#[derive(Debug, Clone)]
pub struct NewBackup<'a> {
    pub backup_name: &'a str,
    pub description: Option<&'a str>,
    pub data: &'a Value,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewBackup<'_> {
    /// Size of the serialized snapshot.
    pub fn size_bytes(&self) -> Result<i64, AppError> {
        let bytes = serde_json::to_vec(self.data).map_err(anyhow::Error::from)?;
        Ok(i64::try_from(bytes.len()).map_err(anyhow::Error::from)?)
    }
}

#[derive(Clone)]
pub struct BackupRepository {
    pool: PgPool,
}

impl BackupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<BackupSummary>, AppError> {
        let backups = sqlx::query_as::<_, BackupSummary>(
            r#"
            SELECT id, backup_name, description, size_bytes, created_at
            FROM backups
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(backups)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Backup>, AppError> {
        let backup = sqlx::query_as::<_, Backup>("SELECT * FROM backups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(backup)
    }

    /// All rows of one snapshot table as a JSON array.
    pub async fn dump_table<'e, E>(&self, executor: E, table: &str) -> Result<Value, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if !SNAPSHOT_TABLES.contains(&table) {
            return Err(AppError::BadRequest(format!("'{}' is not a snapshot table", table)));
        }

        // The table name comes from the fixed list above, never from input.
        let (rows,): (Value,) = sqlx::query_as(&format!(
            "SELECT COALESCE(jsonb_agg(t), '[]'::jsonb) FROM {table} t"
        ))
        .fetch_one(executor)
        .await?;
        Ok(rows)
    }

    pub async fn insert<'e, E>(&self, executor: E, new: &NewBackup<'_>) -> Result<Backup, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let size_bytes = new.size_bytes()?;

        let backup = sqlx::query_as::<_, Backup>(
            r#"
            INSERT INTO backups (backup_name, description, data, size_bytes, created_at)
            VALUES ($1, $2, $3, $4, COALESCE($5, NOW()))
            RETURNING *
            "#,
        )
        .bind(new.backup_name)
        .bind(new.description)
        .bind(new.data)
        .bind(size_bytes)
        .bind(new.created_at)
        .fetch_one(executor)
        .await?;
        Ok(backup)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM backups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
