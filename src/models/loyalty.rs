// src/models/loyalty.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::customer::Tier;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TierCounts {
    pub bronze: usize,
    pub silver: usize,
    pub gold: usize,
    pub platinum: usize,
}

impl TierCounts {
    pub fn total(&self) -> usize {
        self.bronze + self.silver + self.gold + self.platinum
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyStats {
    pub tiers: TierCounts,
    pub total_points: i64,
    pub average_points: f64,
    /// Customers with total_spent ≥ 10,000.
    pub high_value_customers: usize,
    pub active_customers: usize,
}

// A row of the static tier table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TierBenefit {
    pub tier: Tier,
    pub min_spend: Decimal,
    /// None for the open-ended top tier.
    pub max_spend: Option<Decimal>,
    pub discount_percent: u8,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjustPointsPayload {
    /// Positive to award, negative to redeem.
    #[validate(range(min = -100000, max = 100000, message = "invalid_delta"))]
    #[schema(example = -50)]
    pub delta: i32,
}
