// src/handlers/preferences.rs

use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        auth::Session,
        preferences::{UiPreferences, UpdatePreferencesPayload, CURRENT_TAB, CURRENT_VIEW},
    },
};

// GET /api/session/preferences
#[utoipa::path(
    get,
    path = "/api/session/preferences",
    tag = "Session",
    responses((status = 200, description = "Saved dashboard view and tab", body = UiPreferences)),
    security(("api_jwt" = []))
)]
pub async fn get_preferences(
    State(app_state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.preferences.read_all(session.user_id()).await?;
    Ok(Json(UiPreferences::from_entries(&entries)))
}

// PUT /api/session/preferences
// Only the fields present in the body are written.
#[utoipa::path(
    put,
    path = "/api/session/preferences",
    tag = "Session",
    request_body = UpdatePreferencesPayload,
    responses((status = 200, description = "Preferences after the update", body = UiPreferences)),
    security(("api_jwt" = []))
)]
pub async fn update_preferences(
    State(app_state): State<AppState>,
    session: Session,
    Json(payload): Json<UpdatePreferencesPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let user_id = session.user_id();
    if let Some(view) = &payload.current_view {
        app_state.preferences.write(user_id, CURRENT_VIEW, view).await?;
    }
    if let Some(tab) = &payload.current_tab {
        app_state.preferences.write(user_id, CURRENT_TAB, tab).await?;
    }

    let entries = app_state.preferences.read_all(user_id).await?;
    Ok(Json(UiPreferences::from_entries(&entries)))
}
