//! Pure aggregations over an in-memory snapshot of the salon's data.
//!
//! Nothing in here touches the database or the clock: callers load the rows
//! and pass `today` explicitly.

pub mod campaigns;
pub mod customers;
pub mod loyalty;
pub mod segments;

pub use campaigns::CampaignStatsAggregator;
pub use customers::CustomerAggregator;
pub use loyalty::LoyaltyTierCalculator;
pub use segments::AudienceSegmenter;

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::models::customer::{Customer, RecordStatus, Tier};

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    pub fn instant(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).single().expect("valid instant")
    }

    pub fn customer(name: &str, phone: &str) -> Customer {
        Customer {
            id: Uuid::new_v4(),
            name: name.to_string(),
            phone: phone.to_string(),
            email: None,
            birthday: None,
            tier: Tier::Bronze,
            loyalty_points: 0,
            total_visits: 0,
            total_spent: Decimal::ZERO,
            status: RecordStatus::Active,
            join_date: date(2024, 1, 1),
            last_visit: None,
            created_at: instant(2024, 1, 1),
            updated_at: instant(2024, 1, 1),
        }
    }
}
