pub mod appointment;
pub mod auth;
pub mod backup;
pub mod catalog;
pub mod coupon;
pub mod customer;
pub mod dashboard;
pub mod inventory;
pub mod loyalty;
pub mod marketing;
pub mod preferences;
pub mod staff;

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use serde::Serialize;
    use sqlx::{postgres::PgArgumentBuffer, Encode, Postgres};

    use super::{
        appointment::AppointmentStatus,
        auth::UserRole,
        coupon::DiscountKind,
        customer::{RecordStatus, Tier},
        marketing::{Audience, CampaignStatus, Channel},
    };

    const SCHEMA: &str = include_str!("../migrations/20250101000000_initial_schema.sql");

    /// Labels declared by `CREATE TYPE <name> AS ENUM (...)` in the schema.
    fn schema_labels(type_name: &str) -> BTreeSet<String> {
        let prefix = format!("CREATE TYPE {type_name} AS ENUM (");
        let line = SCHEMA
            .lines()
            .find(|l| l.starts_with(&prefix))
            .unwrap_or_else(|| panic!("no enum {type_name} in schema"));
        line[prefix.len()..]
            .trim_end_matches(");")
            .split(',')
            .map(|label| label.trim().trim_matches('\'').to_string())
            .collect()
    }

    /// What sqlx actually sends to Postgres for one value.
    fn wire_label<T>(value: &T) -> String
    where
        T: for<'q> Encode<'q, Postgres>,
    {
        let mut buf = PgArgumentBuffer::default();
        value.encode_by_ref(&mut buf).expect("enum encodes");
        String::from_utf8(buf.to_vec()).expect("utf-8 label")
    }

    fn wire_labels<T>(values: &[T]) -> BTreeSet<String>
    where
        T: for<'q> Encode<'q, Postgres>,
    {
        values.iter().map(|v| wire_label(v)).collect()
    }

    #[test]
    fn every_enum_matches_its_postgres_labels() {
        assert_eq!(wire_labels(&[UserRole::Admin, UserRole::Staff]), schema_labels("user_role"));
        assert_eq!(
            wire_labels(&[Tier::Bronze, Tier::Silver, Tier::Gold, Tier::Platinum]),
            schema_labels("customer_tier")
        );
        assert_eq!(
            wire_labels(&[RecordStatus::Active, RecordStatus::Inactive]),
            schema_labels("record_status")
        );
        assert_eq!(
            wire_labels(&[
                AppointmentStatus::Pending,
                AppointmentStatus::Confirmed,
                AppointmentStatus::Cancelled,
                AppointmentStatus::Completed,
            ]),
            schema_labels("appointment_status")
        );
        assert_eq!(
            wire_labels(&[Channel::Email, Channel::Sms, Channel::WhatsApp]),
            schema_labels("campaign_channel")
        );
        assert_eq!(
            wire_labels(&[
                Audience::All,
                Audience::New,
                Audience::Regular,
                Audience::Inactive,
                Audience::Birthday,
                Audience::HighValue,
            ]),
            schema_labels("campaign_audience")
        );
        assert_eq!(
            wire_labels(&[CampaignStatus::Draft, CampaignStatus::Scheduled, CampaignStatus::Sent]),
            schema_labels("campaign_status")
        );
        assert_eq!(
            wire_labels(&[DiscountKind::Percentage, DiscountKind::Fixed]),
            schema_labels("discount_kind")
        );
    }

    #[test]
    fn whatsapp_is_stored_without_an_underscore() {
        assert_eq!(wire_label(&Channel::WhatsApp), "WHATSAPP");
    }

    fn json<T: Serialize>(value: T) -> String {
        serde_json::to_value(value)
            .expect("serializes")
            .as_str()
            .expect("string")
            .to_string()
    }

    #[test]
    fn enums_share_one_json_casing() {
        assert_eq!(json(Channel::WhatsApp), "whatsapp");
        assert_eq!(json(Channel::Sms), "sms");
        assert_eq!(json(Audience::HighValue), "high_value");
        assert_eq!(json(CampaignStatus::Sent), "sent");
        assert_eq!(json(AppointmentStatus::Completed), "completed");
        assert_eq!(json(DiscountKind::Percentage), "percentage");
        assert_eq!(json(Tier::Platinum), "platinum");
        assert_eq!(json(RecordStatus::Active), "active");
        assert_eq!(json(UserRole::Admin), "admin");
    }
}
