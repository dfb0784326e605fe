// src/services/backup_service.rs

use serde_json::{Map, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        backup_repo::{NewBackup, SNAPSHOT_TABLES},
        BackupRepository,
    },
    models::backup::{Backup, BackupDocument, BackupSummary, CreateBackupPayload},
};

#[derive(Clone)]
pub struct BackupService {
    repo: BackupRepository,
    pool: PgPool,
}

impl BackupService {
    pub fn new(repo: BackupRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn list_backups(&self) -> Result<Vec<BackupSummary>, AppError> {
        self.repo.list().await
    }

    /// Captures every snapshot table inside one transaction so the copy is consistent.
    pub async fn create_backup(&self, input: &CreateBackupPayload) -> Result<BackupSummary, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut data = Map::new();
        for table in SNAPSHOT_TABLES {
            let rows = self.repo.dump_table(&mut *tx, table).await?;
            data.insert(table.to_string(), rows);
        }

        let data = Value::Object(data);
        let new = NewBackup {
            backup_name: &input.backup_name,
            description: input.description.as_deref(),
            data: &data,
            created_at: None,
        };
        let backup = self.repo.insert(&mut *tx, &new).await?;

        tx.commit().await?;

        tracing::info!(backup_id = %backup.id, size_bytes = backup.size_bytes, "Backup created");
        Ok(summary(&backup))
    }

    pub async fn export_backup(&self, id: Uuid) -> Result<BackupDocument, AppError> {
        let backup = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Backup {}", id)))?;
        Ok(to_document(backup))
    }

    /// Stores an exported document as a new backup. Nothing is restored into
    /// the live tables.
    pub async fn import_backup(&self, document: BackupDocument) -> Result<BackupSummary, AppError> {
        let new = prepare_import(&document)?;
        let backup = self.repo.insert(&self.pool, &new).await?;

        tracing::info!(backup_id = %backup.id, "Backup imported");
        Ok(summary(&backup))
    }

    pub async fn delete_backup(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::ResourceNotFound(format!("Backup {}", id)));
        }
        Ok(())
    }
}

fn summary(backup: &Backup) -> BackupSummary {
    BackupSummary {
        id: backup.id,
        backup_name: backup.backup_name.clone(),
        description: backup.description.clone(),
        size_bytes: backup.size_bytes,
        created_at: backup.created_at,
    }
}

pub fn to_document(backup: Backup) -> BackupDocument {
    BackupDocument {
        backup_name: backup.backup_name,
        description: backup.description,
        created_at: backup.created_at,
        data: backup.data,
    }
}

/// Imported backups keep their original name, description and timestamp.
fn prepare_import(document: &BackupDocument) -> Result<NewBackup<'_>, AppError> {
    check_snapshot(&document.data)?;
    Ok(NewBackup {
        backup_name: &document.backup_name,
        description: document.description.as_deref(),
        data: &document.data,
        created_at: Some(document.created_at),
    })
}

/// A snapshot is an object of known table names, each holding an array of rows.
fn check_snapshot(data: &Value) -> Result<(), AppError> {
    let tables = data
        .as_object()
        .ok_or_else(|| AppError::BadRequest("Backup data must be an object".into()))?;

    for (table, rows) in tables {
        if !SNAPSHOT_TABLES.contains(&table.as_str()) {
            return Err(AppError::BadRequest(format!("Unknown table '{}' in backup", table)));
        }
        if !rows.is_array() {
            return Err(AppError::BadRequest(format!("Rows of '{}' must be an array", table)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::instant;
    use serde_json::json;

    fn backup() -> Backup {
        Backup {
            id: Uuid::new_v4(),
            backup_name: "Before Diwali cleanup".into(),
            description: Some("weekly".into()),
            data: json!({ "customers": [{ "name": "Priya", "phone": "9876543210" }], "coupons": [] }),
            size_bytes: 64,
            created_at: instant(2025, 10, 12),
        }
    }

    #[test]
    fn exported_document_survives_a_json_round_trip() {
        let document = to_document(backup());

        let text = serde_json::to_string(&document).unwrap();
        let parsed: BackupDocument = serde_json::from_str(&text).unwrap();

        assert_eq!(parsed, document);
        assert_eq!(parsed.backup_name, "Before Diwali cleanup");
        assert_eq!(parsed.description.as_deref(), Some("weekly"));
    }

    #[test]
    fn exported_document_uses_snake_case_keys() {
        let value = serde_json::to_value(to_document(backup())).unwrap();
        assert!(value.get("backup_name").is_some());
        assert!(value.get("created_at").is_some());
    }

    // Mirrors the row the INSERT returns.
    fn stored(new: &NewBackup<'_>) -> Backup {
        Backup {
            id: Uuid::new_v4(),
            backup_name: new.backup_name.to_string(),
            description: new.description.map(str::to_string),
            data: new.data.clone(),
            size_bytes: new.size_bytes().unwrap(),
            created_at: new.created_at.unwrap(),
        }
    }

    #[test]
    fn imported_document_exports_unchanged() {
        let original = to_document(backup());
        let text = serde_json::to_string(&original).unwrap();
        let uploaded: BackupDocument = serde_json::from_str(&text).unwrap();

        let new = prepare_import(&uploaded).unwrap();
        let row = stored(&new);

        assert_eq!(row.size_bytes, serde_json::to_vec(&original.data).unwrap().len() as i64);
        assert_eq!(to_document(row), original);
    }

    #[test]
    fn import_rejects_a_malformed_snapshot() {
        let mut document = to_document(backup());
        document.data = json!({ "payroll": [] });
        assert!(matches!(prepare_import(&document), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn snapshot_with_known_tables_is_accepted() {
        assert!(check_snapshot(&backup().data).is_ok());
    }

    #[test]
    fn snapshot_with_unknown_table_or_bad_shape_is_rejected() {
        assert!(check_snapshot(&json!({ "users": [] })).is_err());
        assert!(check_snapshot(&json!({ "customers": {} })).is_err());
        assert!(check_snapshot(&json!([1, 2, 3])).is_err());
    }
}
