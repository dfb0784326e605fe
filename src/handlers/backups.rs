// src/handlers/backups.rs

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::AdminOnly,
    models::backup::{BackupDocument, BackupSummary, CreateBackupPayload},
};

// GET /api/backups
#[utoipa::path(
    get,
    path = "/api/backups",
    tag = "Backups",
    responses((status = 200, body = Vec<BackupSummary>), (status = 403, description = "Admins only")),
    security(("api_jwt" = []))
)]
pub async fn list_backups(
    State(app_state): State<AppState>,
    _guard: AdminOnly,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.backup_service.list_backups().await?))
}

// POST /api/backups
#[utoipa::path(
    post,
    path = "/api/backups",
    tag = "Backups",
    request_body = CreateBackupPayload,
    responses((status = 201, description = "Snapshot stored", body = BackupSummary)),
    security(("api_jwt" = []))
)]
pub async fn create_backup(
    State(app_state): State<AppState>,
    _guard: AdminOnly,
    Json(payload): Json<CreateBackupPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let backup = app_state.backup_service.create_backup(&payload).await?;
    Ok((StatusCode::CREATED, Json(backup)))
}

// GET /api/backups/{id}/export
#[utoipa::path(
    get,
    path = "/api/backups/{id}/export",
    tag = "Backups",
    params(("id" = Uuid, Path, description = "Backup id")),
    responses(
        (status = 200, description = "Downloadable JSON document", body = BackupDocument),
        (status = 404, description = "No such backup")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_backup(
    State(app_state): State<AppState>,
    _guard: AdminOnly,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let document = app_state.backup_service.export_backup(id).await?;
    let disposition = format!("attachment; filename=\"backup-{}.json\"", id);
    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(document)))
}

// POST /api/backups/import
#[utoipa::path(
    post,
    path = "/api/backups/import",
    tag = "Backups",
    request_body = BackupDocument,
    responses(
        (status = 201, description = "Imported as a new backup", body = BackupSummary),
        (status = 400, description = "Malformed document")
    ),
    security(("api_jwt" = []))
)]
pub async fn import_backup(
    State(app_state): State<AppState>,
    _guard: AdminOnly,
    Json(document): Json<BackupDocument>,
) -> Result<impl IntoResponse, AppError> {
    let backup = app_state.backup_service.import_backup(document).await?;
    Ok((StatusCode::CREATED, Json(backup)))
}

// DELETE /api/backups/{id}
#[utoipa::path(
    delete,
    path = "/api/backups/{id}",
    tag = "Backups",
    params(("id" = Uuid, Path, description = "Backup id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "No such backup")),
    security(("api_jwt" = []))
)]
pub async fn delete_backup(
    State(app_state): State<AppState>,
    _guard: AdminOnly,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.backup_service.delete_backup(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
