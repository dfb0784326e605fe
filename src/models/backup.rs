// src/models/backup.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub id: Uuid,
    #[schema(example = "Before Diwali cleanup")]
    pub backup_name: String,
    pub description: Option<String>,
    #[schema(value_type = Object)]
    pub data: Value,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
}

// Listing without the (large) snapshot body.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackupSummary {
    pub id: Uuid,
    pub backup_name: String,
    pub description: Option<String>,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBackupPayload {
    #[validate(length(min = 1, max = 120, message = "required"))]
    pub backup_name: String,
    pub description: Option<String>,
}

/// The exported file format, also accepted by import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct BackupDocument {
    pub backup_name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    #[schema(value_type = Object)]
    pub data: Value,
}
