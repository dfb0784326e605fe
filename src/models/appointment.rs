// src/models/appointment.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validate_not_negative;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "appointment_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

// The customer is referenced by value (name + phone), not by id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    #[schema(example = "Priya Sharma")]
    pub customer_name: String,
    #[schema(example = "9876543210")]
    pub customer_phone: String,
    #[schema(example = "Hair Spa")]
    pub service: String,
    #[schema(example = "Anita")]
    pub staff: String,
    pub date: NaiveDate,
    #[schema(value_type = String, example = "14:30:00")]
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    #[schema(example = "1200.00")]
    pub price: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Status is not part of the payload: it only moves through the status endpoint.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AppointmentPayload {
    #[validate(length(min = 1, message = "required"))]
    pub customer_name: String,

    #[validate(length(min = 7, max = 15, message = "invalid_phone"))]
    pub customer_phone: String,

    #[validate(length(min = 1, message = "required"))]
    pub service: String,

    #[validate(length(min = 1, message = "required"))]
    pub staff: String,

    #[schema(value_type = String, format = Date, example = "2025-06-01")]
    pub date: NaiveDate,

    #[schema(value_type = String, example = "14:30:00")]
    pub time: NaiveTime,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub price: Decimal,

    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentStatusPayload {
    pub status: AppointmentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body() -> serde_json::Value {
        json!({
            "customerName": "Priya Sharma",
            "customerPhone": "9876543210",
            "service": "Hair Spa",
            "staff": "Anita",
            "date": "2025-06-01",
            "time": "14:30:00",
            "price": 1200
        })
    }

    #[test]
    fn payload_cannot_carry_a_status() {
        let mut with_status = body();
        with_status["status"] = json!("completed");
        assert!(serde_json::from_value::<AppointmentPayload>(with_status).is_err());
        assert!(serde_json::from_value::<AppointmentPayload>(body()).is_ok());
    }

    #[test]
    fn negative_price_fails_validation() {
        let mut negative = body();
        negative["price"] = json!(-50);
        let payload: AppointmentPayload = serde_json::from_value(negative).unwrap();
        assert!(payload.validate().is_err());
    }
}
