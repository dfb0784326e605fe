// src/models/customer.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "customer_tier", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

/// Shared by customers, staff, services and coupons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "record_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Active,
    Inactive,
}

// --- CUSTOMER ---

// Several rows may share a phone; the newest `created_at` is the current one.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    #[schema(example = "Priya Sharma")]
    pub name: String,
    #[schema(example = "9876543210")]
    pub phone: String,
    pub email: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub tier: Tier,
    #[schema(example = 120)]
    pub loyalty_points: i32,
    pub total_visits: i32,
    #[schema(example = "8500.00")]
    pub total_spent: Decimal,
    pub status: RecordStatus,
    pub join_date: NaiveDate,
    pub last_visit: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- PAYLOADS ---

// Tier, points, visits and spend are not editable here: they move through
// appointment completion and the admin loyalty endpoints.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CustomerPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Priya Sharma")]
    pub name: String,

    #[validate(length(min = 7, max = 15, message = "invalid_phone"))]
    #[schema(example = "9876543210")]
    pub phone: String,

    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,

    #[schema(value_type = Option<String>, format = Date, example = "1992-03-14")]
    pub birthday: Option<NaiveDate>,

    pub status: Option<RecordStatus>,

    pub join_date: Option<NaiveDate>,
}

/// One phone shared by more than one customer row.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroup {
    pub phone: String,
    pub latest: Customer,
    pub records: Vec<Customer>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_fields_parse() {
        let payload: CustomerPayload = serde_json::from_value(json!({
            "name": "Priya Sharma",
            "phone": "9876543210",
            "birthday": "1992-03-14",
            "status": "inactive"
        }))
        .unwrap();
        assert_eq!(payload.status, Some(RecordStatus::Inactive));
        assert!(payload.join_date.is_none());
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn loyalty_counters_are_rejected() {
        for (field, value) in [
            ("loyaltyPoints", json!(5000)),
            ("totalSpent", json!("99999.00")),
            ("totalVisits", json!(40)),
            ("tier", json!("platinum")),
            ("lastVisit", json!("2025-01-01")),
        ] {
            let mut body = json!({ "name": "Priya Sharma", "phone": "9876543210" });
            body[field] = value;
            assert!(
                serde_json::from_value::<CustomerPayload>(body).is_err(),
                "{field} should not be accepted"
            );
        }
    }
}
