// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::AdminOnly,
    models::auth::{AuthResponse, CreateUserPayload, LoginUserPayload, Session, User},
};

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Token and session", body = AuthResponse),
        (status = 401, description = "Invalid e-mail or password")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let (token, session) = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse { token, session }))
}

// POST /api/auth/users
#[utoipa::path(
    post,
    path = "/api/auth/users",
    tag = "Auth",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Account created", body = User),
        (status = 403, description = "Admins only"),
        (status = 409, description = "E-mail already registered")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    _guard: AdminOnly,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let user = app_state
        .auth_service
        .create_user(&payload.email, &payload.password, payload.role, payload.staff_id)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

// GET /api/session
#[utoipa::path(
    get,
    path = "/api/session",
    tag = "Auth",
    responses(
        (status = 200, description = "The caller's session", body = Session),
        (status = 401, description = "Not authenticated")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_session(session: Session) -> Json<Session> {
    Json(session)
}
