// src/handlers/loyalty.rs

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::AdminOnly,
    models::{
        customer::Customer,
        loyalty::{AdjustPointsPayload, LoyaltyStats, TierBenefit},
    },
};

// GET /api/loyalty/stats
#[utoipa::path(
    get,
    path = "/api/loyalty/stats",
    tag = "Loyalty",
    responses((status = 200, body = LoyaltyStats), (status = 403, description = "Admins only")),
    security(("api_jwt" = []))
)]
pub async fn get_stats(
    State(app_state): State<AppState>,
    _guard: AdminOnly,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.loyalty_service.stats().await?))
}

// GET /api/loyalty/tiers
#[utoipa::path(
    get,
    path = "/api/loyalty/tiers",
    tag = "Loyalty",
    responses((status = 200, description = "Spend bands and discounts", body = Vec<TierBenefit>)),
    security(("api_jwt" = []))
)]
pub async fn list_tiers(State(app_state): State<AppState>, _guard: AdminOnly) -> Json<Vec<TierBenefit>> {
    Json(app_state.loyalty_service.tiers())
}

// POST /api/loyalty/customers/{id}/points
#[utoipa::path(
    post,
    path = "/api/loyalty/customers/{id}/points",
    tag = "Loyalty",
    params(("id" = Uuid, Path, description = "Customer id")),
    request_body = AdjustPointsPayload,
    responses(
        (status = 200, body = Customer),
        (status = 404, description = "No such customer"),
        (status = 422, description = "Not enough points")
    ),
    security(("api_jwt" = []))
)]
pub async fn adjust_points(
    State(app_state): State<AppState>,
    _guard: AdminOnly,
    Path(id): Path<Uuid>,
    Json(payload): Json<AdjustPointsPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    Ok(Json(app_state.loyalty_service.adjust_points(id, payload.delta).await?))
}

// POST /api/loyalty/customers/{id}/recalculate-tier
#[utoipa::path(
    post,
    path = "/api/loyalty/customers/{id}/recalculate-tier",
    tag = "Loyalty",
    params(("id" = Uuid, Path, description = "Customer id")),
    responses((status = 200, body = Customer), (status = 404, description = "No such customer")),
    security(("api_jwt" = []))
)]
pub async fn recalculate_tier(
    State(app_state): State<AppState>,
    _guard: AdminOnly,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.loyalty_service.recalculate_tier(id).await?))
}
