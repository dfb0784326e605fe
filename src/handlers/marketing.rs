// src/handlers/marketing.rs

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
    models::{
        customer::Customer,
        marketing::{
            Audience, CampaignResponse, CampaignStats, CreateCampaignPayload, RecordResponsesPayload,
            SendReport,
        },
    },
};

// GET /api/marketing/campaigns
#[utoipa::path(
    get,
    path = "/api/marketing/campaigns",
    tag = "Marketing",
    responses((status = 200, body = Vec<CampaignResponse>), (status = 403, description = "Admins only")),
    security(("api_jwt" = []))
)]
pub async fn list_campaigns(
    State(app_state): State<AppState>,
    _guard: AdminOnly,
) -> Result<impl IntoResponse, AppError> {
    let campaigns: Vec<CampaignResponse> = app_state
        .marketing_service
        .list_campaigns()
        .await?
        .into_iter()
        .map(CampaignResponse::from)
        .collect();
    Ok(Json(campaigns))
}

// POST /api/marketing/campaigns
#[utoipa::path(
    post,
    path = "/api/marketing/campaigns",
    tag = "Marketing",
    request_body = CreateCampaignPayload,
    responses((status = 201, body = CampaignResponse), (status = 400, description = "Invalid fields")),
    security(("api_jwt" = []))
)]
pub async fn create_campaign(
    State(app_state): State<AppState>,
    _guard: AdminOnly,
    Json(payload): Json<CreateCampaignPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let campaign = app_state.marketing_service.create_campaign(&payload).await?;
    Ok((StatusCode::CREATED, Json(CampaignResponse::from(campaign))))
}

// DELETE /api/marketing/campaigns/{id}
#[utoipa::path(
    delete,
    path = "/api/marketing/campaigns/{id}",
    tag = "Marketing",
    params(("id" = Uuid, Path, description = "Campaign id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "No such campaign")),
    security(("api_jwt" = []))
)]
pub async fn delete_campaign(
    State(app_state): State<AppState>,
    _guard: AdminOnly,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.marketing_service.delete_campaign(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/marketing/stats
#[utoipa::path(
    get,
    path = "/api/marketing/stats",
    tag = "Marketing",
    responses((status = 200, body = CampaignStats)),
    security(("api_jwt" = []))
)]
pub async fn get_stats(
    State(app_state): State<AppState>,
    _guard: AdminOnly,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.marketing_service.stats(today()).await?))
}

// GET /api/marketing/audience/{segment}
#[utoipa::path(
    get,
    path = "/api/marketing/audience/{segment}",
    tag = "Marketing",
    params(("segment" = Audience, Path, description = "all, new, regular, inactive, birthday or high_value")),
    responses((status = 200, description = "Current customers in the segment", body = Vec<Customer>)),
    security(("api_jwt" = []))
)]
pub async fn get_audience(
    State(app_state): State<AppState>,
    _guard: AdminOnly,
    Path(segment): Path<Audience>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.marketing_service.audience(segment, today()).await?))
}

// POST /api/marketing/campaigns/{id}/send
#[utoipa::path(
    post,
    path = "/api/marketing/campaigns/{id}/send",
    tag = "Marketing",
    params(("id" = Uuid, Path, description = "Campaign id")),
    responses(
        (status = 200, body = SendReport),
        (status = 404, description = "No such campaign"),
        (status = 502, description = "The notification provider failed; nothing was counted")
    ),
    security(("api_jwt" = []))
)]
pub async fn send_campaign(
    State(app_state): State<AppState>,
    _guard: AdminOnly,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.marketing_service.send_campaign(id, today()).await?))
}

// POST /api/marketing/campaigns/{id}/responses
#[utoipa::path(
    post,
    path = "/api/marketing/campaigns/{id}/responses",
    tag = "Marketing",
    params(("id" = Uuid, Path, description = "Campaign id")),
    request_body = RecordResponsesPayload,
    responses((status = 200, body = CampaignResponse), (status = 404, description = "No such campaign")),
    security(("api_jwt" = []))
)]
pub async fn record_responses(
    State(app_state): State<AppState>,
    _guard: AdminOnly,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordResponsesPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let campaign = app_state.marketing_service.record_responses(id, payload.count).await?;
    Ok(Json(CampaignResponse::from(campaign)))
}
