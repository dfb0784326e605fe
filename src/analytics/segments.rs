// src/analytics/segments.rs

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;

use super::loyalty::HIGH_VALUE_SPEND;
use crate::models::{customer::Customer, marketing::Audience};

pub const NEW_CUSTOMER_DAYS: u64 = 30;
pub const INACTIVE_AFTER_DAYS: u64 = 90;
pub const REGULAR_MIN_VISITS: i32 = 5;

/// Fixed segment rules for campaign targeting, evaluated against `today`.
pub struct AudienceSegmenter {
    today: NaiveDate,
}

impl AudienceSegmenter {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn segment<'a>(&self, audience: Audience, customers: &'a [Customer]) -> Vec<&'a Customer> {
        customers.iter().filter(|c| self.matches(audience, c)).collect()
    }

    pub fn matches(&self, audience: Audience, customer: &Customer) -> bool {
        match audience {
            Audience::All => true,
            Audience::New => customer.join_date >= self.days_ago(NEW_CUSTOMER_DAYS),
            Audience::Regular => customer.total_visits >= REGULAR_MIN_VISITS,
            // Never visited counts as inactive.
            Audience::Inactive => match customer.last_visit {
                None => true,
                Some(last) => last < self.days_ago(INACTIVE_AFTER_DAYS),
            },
            // No birthday on file: never in the birthday segment.
            Audience::Birthday => customer
                .birthday
                .is_some_and(|b| b.month() == self.today.month()),
            Audience::HighValue => customer.total_spent >= Decimal::from(HIGH_VALUE_SPEND),
        }
    }

    fn days_ago(&self, days: u64) -> NaiveDate {
        self.today
            .checked_sub_days(Days::new(days))
            .unwrap_or(NaiveDate::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{customer, date};

    const ALL: [Audience; 6] = [
        Audience::All,
        Audience::New,
        Audience::Regular,
        Audience::Inactive,
        Audience::Birthday,
        Audience::HighValue,
    ];

    fn segmenter() -> AudienceSegmenter {
        AudienceSegmenter::new(date(2025, 6, 15))
    }

    #[test]
    fn all_is_identity() {
        let customers = vec![customer("A", "1"), customer("B", "2"), customer("C", "3")];
        let ids: Vec<_> = customers.iter().map(|c| c.id).collect();

        let picked: Vec<_> = segmenter()
            .segment(Audience::All, &customers)
            .iter()
            .map(|c| c.id)
            .collect();

        assert_eq!(picked, ids);
    }

    #[test]
    fn every_segment_of_nothing_is_empty() {
        for audience in ALL {
            assert!(segmenter().segment(audience, &[]).is_empty(), "{audience:?}");
        }
    }

    #[test]
    fn new_means_joined_within_thirty_days() {
        let mut recent = customer("Recent", "1");
        recent.join_date = date(2025, 5, 16);
        let mut old = customer("Old", "2");
        old.join_date = date(2025, 5, 15);
        let customers = vec![recent, old];

        let picked = segmenter().segment(Audience::New, &customers);

        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].name, "Recent");
    }

    #[test]
    fn regular_needs_five_visits() {
        let mut four = customer("Four", "1");
        four.total_visits = 4;
        let mut five = customer("Five", "2");
        five.total_visits = 5;
        let customers = vec![four, five];

        let picked = segmenter().segment(Audience::Regular, &customers);

        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].name, "Five");
    }

    #[test]
    fn missing_last_visit_counts_as_inactive() {
        let never = customer("Never", "1");
        let mut lapsed = customer("Lapsed", "2");
        lapsed.last_visit = Some(date(2025, 3, 16));
        let mut recent = customer("Recent", "3");
        recent.last_visit = Some(date(2025, 3, 17));
        let customers = vec![never, lapsed, recent];

        let names: Vec<_> = segmenter()
            .segment(Audience::Inactive, &customers)
            .iter()
            .map(|c| c.name.as_str())
            .collect();

        assert_eq!(names, vec!["Never", "Lapsed"]);
    }

    #[test]
    fn missing_birthday_is_never_a_birthday() {
        let unknown = customer("Unknown", "1");
        let mut june = customer("June", "2");
        june.birthday = Some(date(1990, 6, 30));
        let mut july = customer("July", "3");
        july.birthday = Some(date(1990, 7, 1));
        let customers = vec![unknown, june, july];

        let names: Vec<_> = segmenter()
            .segment(Audience::Birthday, &customers)
            .iter()
            .map(|c| c.name.as_str())
            .collect();

        assert_eq!(names, vec!["June"]);
    }

    #[test]
    fn high_value_starts_at_ten_thousand() {
        let mut below = customer("Below", "1");
        below.total_spent = Decimal::new(999_999, 2);
        let mut at = customer("At", "2");
        at.total_spent = Decimal::from(10_000);
        let customers = vec![below, at];

        let picked = segmenter().segment(Audience::HighValue, &customers);

        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].name, "At");
    }
}
