// src/handlers/appointments.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::appointment::{Appointment, AppointmentPayload, UpdateAppointmentStatusPayload},
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AppointmentListQuery {
    /// Only appointments on this day (YYYY-MM-DD).
    pub date: Option<NaiveDate>,
}

// GET /api/appointments
#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = "Appointments",
    params(AppointmentListQuery),
    responses((status = 200, body = Vec<Appointment>)),
    security(("api_jwt" = []))
)]
pub async fn list_appointments(
    State(app_state): State<AppState>,
    Query(query): Query<AppointmentListQuery>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.appointment_service.list_appointments(query.date).await?))
}

// POST /api/appointments
#[utoipa::path(
    post,
    path = "/api/appointments",
    tag = "Appointments",
    request_body = AppointmentPayload,
    responses(
        (status = 201, description = "Appointment booked", body = Appointment),
        (status = 400, description = "Invalid fields")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_appointment(
    State(app_state): State<AppState>,
    Json(payload): Json<AppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let appointment = app_state.appointment_service.create_appointment(&payload).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

// PUT /api/appointments/{id}
#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    tag = "Appointments",
    params(("id" = Uuid, Path, description = "Appointment id")),
    request_body = AppointmentPayload,
    responses(
        (status = 200, body = Appointment),
        (status = 404, description = "No such appointment")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_appointment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    Ok(Json(app_state.appointment_service.update_appointment(id, &payload).await?))
}

// DELETE /api/appointments/{id}
#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    tag = "Appointments",
    params(("id" = Uuid, Path, description = "Appointment id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such appointment")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_appointment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.appointment_service.delete_appointment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/appointments/{id}/status
#[utoipa::path(
    post,
    path = "/api/appointments/{id}/status",
    tag = "Appointments",
    params(("id" = Uuid, Path, description = "Appointment id")),
    request_body = UpdateAppointmentStatusPayload,
    responses(
        (status = 200, body = Appointment),
        (status = 400, description = "Transition not allowed"),
        (status = 404, description = "No such appointment")
    ),
    security(("api_jwt" = []))
)]
pub async fn change_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.appointment_service.change_status(id, payload.status).await?))
}
