// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validate_not_negative;

// Retail and back-bar products (shampoo, colour tubes, ...).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Uuid,
    #[schema(example = "Keratin Shampoo 1L")]
    pub name: String,
    #[schema(example = "Hair Care")]
    pub category: String,
    #[schema(example = 12)]
    pub quantity: i32,
    #[schema(example = 5)]
    pub min_stock: i32,
    #[schema(example = "850.00")]
    pub unit_price: Decimal,
    pub supplier: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,

    #[validate(length(min = 1, message = "required"))]
    pub category: String,

    #[validate(range(min = 0, message = "negative_quantity"))]
    pub quantity: i32,

    #[validate(range(min = 0, message = "negative_quantity"))]
    #[serde(default)]
    pub min_stock: i32,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub unit_price: Decimal,

    pub supplier: Option<String>,
}
