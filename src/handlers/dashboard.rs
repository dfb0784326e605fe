// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use super::today;
use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::AdminOnly,
    models::dashboard::DashboardSummary,
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Headline numbers for the admin dashboard", body = DashboardSummary),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admins only")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    _guard: AdminOnly,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.dashboard_service.get_summary(today()).await?;
    Ok((StatusCode::OK, Json(summary)))
}
