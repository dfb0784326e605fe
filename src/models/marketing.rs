// src/models/marketing.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- ENUMS ---

// Set when the campaign is created; never inferred from the campaign name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "campaign_channel", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Sms,
    #[sqlx(rename = "WHATSAPP")]
    #[serde(rename = "whatsapp")]
    WhatsApp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "campaign_audience", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    All,
    New,
    Regular,
    Inactive,
    Birthday,
    HighValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "campaign_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Scheduled,
    Sent,
}

// --- CAMPAIGN ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: Uuid,
    #[schema(example = "Monsoon Hair Spa Offer")]
    pub name: String,
    pub channel: Channel,
    pub target_audience: Audience,
    #[schema(example = "Flat 20% off on Hair Spa this week!")]
    pub message: String,
    pub sent: i32,
    pub responses: i32,
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
}

impl Campaign {
    /// responses / sent × 100, or 0 when nothing was sent.
    pub fn response_rate(&self) -> f64 {
        if self.sent <= 0 {
            return 0.0;
        }
        f64::from(self.responses) * 100.0 / f64::from(self.sent)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignResponse {
    #[serde(flatten)]
    pub campaign: Campaign,
    #[schema(example = 12.5)]
    pub response_rate: f64,
}

impl From<Campaign> for CampaignResponse {
    fn from(campaign: Campaign) -> Self {
        let response_rate = campaign.response_rate();
        Self { campaign, response_rate }
    }
}

// --- PAYLOADS ---

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,

    pub channel: Channel,

    #[serde(default = "default_audience")]
    pub target_audience: Audience,

    #[validate(length(min = 1, max = 1000, message = "invalid_message"))]
    pub message: String,
}

fn default_audience() -> Audience {
    Audience::All
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponsesPayload {
    #[validate(range(min = 1, message = "invalid_count"))]
    pub count: i32,
}

// --- STATS ---

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignStats {
    pub total_campaigns: usize,
    pub emails_sent: i64,
    pub sms_sent: i64,
    pub whatsapp_sent: i64,
    /// Σresponses / Σsent × 100.
    pub open_rate: f64,
    /// Mean of the per-campaign response rates.
    pub average_response_rate: f64,
    /// Completed appointments in the last 30 days.
    pub revenue_last_30_days: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendReport {
    pub campaign_id: Uuid,
    pub recipients: usize,
}
