// src/handlers/coupons.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use super::today;
use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::AdminOnly,
    models::coupon::{Coupon, CouponPayload, CouponQuote, ValidateCouponPayload},
};

// GET /api/coupons
#[utoipa::path(
    get,
    path = "/api/coupons",
    tag = "Coupons",
    responses((status = 200, body = Vec<Coupon>), (status = 403, description = "Admins only")),
    security(("api_jwt" = []))
)]
pub async fn list_coupons(
    State(app_state): State<AppState>,
    _guard: AdminOnly,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.coupon_service.list_coupons().await?))
}

// POST /api/coupons
#[utoipa::path(
    post,
    path = "/api/coupons",
    tag = "Coupons",
    request_body = CouponPayload,
    responses(
        (status = 201, body = Coupon),
        (status = 400, description = "Invalid fields"),
        (status = 409, description = "Code already exists")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_coupon(
    State(app_state): State<AppState>,
    _guard: AdminOnly,
    Json(payload): Json<CouponPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let coupon = app_state.coupon_service.create_coupon(&payload).await?;
    Ok((StatusCode::CREATED, Json(coupon)))
}

// DELETE /api/coupons/{id}
#[utoipa::path(
    delete,
    path = "/api/coupons/{id}",
    tag = "Coupons",
    params(("id" = Uuid, Path, description = "Coupon id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "No such coupon")),
    security(("api_jwt" = []))
)]
pub async fn delete_coupon(
    State(app_state): State<AppState>,
    _guard: AdminOnly,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.coupon_service.delete_coupon(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/coupons/validate
#[utoipa::path(
    post,
    path = "/api/coupons/validate",
    tag = "Coupons",
    request_body = ValidateCouponPayload,
    responses(
        (status = 200, description = "Discount applied to the amount", body = CouponQuote),
        (status = 422, description = "Coupon cannot be used")
    ),
    security(("api_jwt" = []))
)]
pub async fn validate_coupon(
    State(app_state): State<AppState>,
    _guard: AdminOnly,
    Json(payload): Json<ValidateCouponPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let quote = app_state
        .coupon_service
        .quote(&payload.code, payload.amount, today(), payload.redeem)
        .await?;
    Ok(Json(quote))
}
