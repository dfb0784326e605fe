// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::{appointment::Appointment, loyalty::LoyaltyStats};

// The cards at the top of the admin dashboard
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Distinct phones, duplicates collapsed.
    pub unique_customers: usize,
    pub duplicate_phones: usize,
    pub appointments_today: usize,
    pub pending_appointments: usize,
    pub revenue_last_30_days: Decimal,
    pub low_stock_items: usize,
    pub active_staff: usize,
    pub loyalty: LoyaltyStats,
    pub upcoming: Vec<Appointment>,
}
