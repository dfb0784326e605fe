// src/models/coupon.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validate_not_negative;

use super::customer::RecordStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "discount_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    Percentage,
    Fixed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: Uuid,
    #[schema(example = "DIWALI20")]
    pub code: String,
    pub description: Option<String>,
    pub discount_kind: DiscountKind,
    #[schema(example = "20.00")]
    pub discount_value: Decimal,
    #[schema(example = "1000.00")]
    pub min_purchase: Decimal,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
    pub usage_limit: Option<i32>,
    pub used_count: i32,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CouponPayload {
    #[validate(length(min = 3, max = 20, message = "invalid_code"))]
    pub code: String,

    pub description: Option<String>,

    pub discount_kind: DiscountKind,

    pub discount_value: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub min_purchase: Decimal,

    #[schema(value_type = String, format = Date)]
    pub valid_from: NaiveDate,

    #[schema(value_type = String, format = Date)]
    pub valid_until: NaiveDate,

    #[validate(range(min = 1, message = "invalid_limit"))]
    pub usage_limit: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateCouponPayload {
    #[validate(length(min = 1, message = "required"))]
    pub code: String,
    #[validate(custom(function = "validate_not_negative"))]
    pub amount: Decimal,
    /// When true the coupon's used_count is incremented.
    #[serde(default)]
    pub redeem: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CouponQuote {
    pub code: String,
    pub amount: Decimal,
    pub discount: Decimal,
    pub final_amount: Decimal,
}
