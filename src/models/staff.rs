// src/models/staff.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::customer::RecordStatus;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: Uuid,
    #[schema(example = "Anita")]
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    #[schema(example = "Senior Stylist")]
    pub position: String,
    pub specialization: Option<String>,
    pub status: RecordStatus,
    pub join_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,

    #[validate(length(min = 7, max = 15, message = "invalid_phone"))]
    pub phone: String,

    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    pub position: String,

    pub specialization: Option<String>,
    pub status: Option<RecordStatus>,
    pub join_date: Option<NaiveDate>,
}
