// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validate_not_negative;

use super::customer::RecordStatus;

// A bookable salon service ("Haircut", "Facial", ...).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalonService {
    pub id: Uuid,
    #[schema(example = "Hair Spa")]
    pub name: String,
    #[schema(example = "Hair")]
    pub category: String,
    #[schema(example = "1500.00")]
    pub price: Decimal,
    #[schema(example = 60)]
    pub duration_minutes: i32,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,

    #[validate(length(min = 1, message = "required"))]
    pub category: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,

    #[validate(range(min = 1, message = "invalid_duration"))]
    pub duration_minutes: i32,

    pub status: Option<RecordStatus>,
}
