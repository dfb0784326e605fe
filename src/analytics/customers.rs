// src/analytics/customers.rs

use std::collections::BTreeMap;

use crate::models::customer::{Customer, DuplicateGroup};

/// Groups customer rows by phone number.
///
/// Duplicate rows per phone are tolerated, never merged: the "current" record
/// of a phone is the one with the greatest `created_at`. When two rows share
/// the same `created_at`, the first one encountered in the input wins.
pub struct CustomerAggregator<'a> {
    by_phone: BTreeMap<&'a str, Vec<&'a Customer>>,
}

impl<'a> CustomerAggregator<'a> {
    pub fn new(customers: &'a [Customer]) -> Self {
        let mut by_phone: BTreeMap<&'a str, Vec<&'a Customer>> = BTreeMap::new();
        for customer in customers {
            by_phone.entry(customer.phone.as_str()).or_default().push(customer);
        }
        Self { by_phone }
    }

    /// phone -> every row sharing it, in input order.
    pub fn groups(&self) -> &BTreeMap<&'a str, Vec<&'a Customer>> {
        &self.by_phone
    }

    /// phone -> the most recently created row.
    pub fn latest_by_phone(&self) -> BTreeMap<&'a str, &'a Customer> {
        self.by_phone
            .iter()
            .filter_map(|(phone, rows)| latest(rows).map(|c| (*phone, c)))
            .collect()
    }

    /// Phones with more than one row, sorted.
    pub fn duplicate_phones(&self) -> Vec<&'a str> {
        self.by_phone
            .iter()
            .filter(|(_, rows)| rows.len() > 1)
            .map(|(phone, _)| *phone)
            .collect()
    }

    /// One row per phone (the latest), ordered by phone.
    pub fn unique_customers(&self) -> Vec<&'a Customer> {
        self.latest_by_phone().into_values().collect()
    }

    pub fn duplicate_groups(&self) -> Vec<DuplicateGroup> {
        self.by_phone
            .iter()
            .filter(|(_, rows)| rows.len() > 1)
            .filter_map(|(phone, rows)| {
                latest(rows).map(|l| DuplicateGroup {
                    phone: phone.to_string(),
                    latest: l.clone(),
                    records: rows.iter().map(|c| (*c).clone()).collect(),
                })
            })
            .collect()
    }
}

fn latest<'a>(rows: &[&'a Customer]) -> Option<&'a Customer> {
    let mut best: Option<&'a Customer> = None;
    for &row in rows {
        // Strictly greater: ties keep the earlier row.
        match best {
            Some(b) if row.created_at <= b.created_at => {}
            _ => best = Some(row),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{customer, instant};

    #[test]
    fn empty_input_yields_empty_views() {
        let agg = CustomerAggregator::new(&[]);
        assert!(agg.groups().is_empty());
        assert!(agg.latest_by_phone().is_empty());
        assert!(agg.duplicate_phones().is_empty());
        assert!(agg.duplicate_groups().is_empty());
    }

    #[test]
    fn latest_record_per_phone_is_the_newest() {
        let mut jan = customer("Asha", "555");
        jan.created_at = instant(2024, 1, 1);
        let mut feb = customer("Asha K", "555");
        feb.created_at = instant(2024, 2, 1);
        let feb_id = feb.id;
        let customers = vec![jan, feb];

        let agg = CustomerAggregator::new(&customers);

        assert_eq!(agg.duplicate_phones(), vec!["555"]);
        assert_eq!(agg.latest_by_phone()["555"].id, feb_id);
    }

    #[test]
    fn equal_timestamps_keep_the_first_row() {
        let first = customer("First", "777");
        let mut second = customer("Second", "777");
        second.created_at = first.created_at;
        let first_id = first.id;
        let customers = vec![first, second];

        let agg = CustomerAggregator::new(&customers);

        assert_eq!(agg.latest_by_phone()["777"].id, first_id);
    }

    #[test]
    fn duplicate_count_matches_groups_larger_than_one() {
        let customers = vec![
            customer("A", "1"),
            customer("B", "2"),
            customer("C", "2"),
            customer("D", "3"),
            customer("E", "3"),
            customer("F", "3"),
        ];
        let agg = CustomerAggregator::new(&customers);

        let expected = agg.groups().values().filter(|g| g.len() > 1).count();
        assert_eq!(agg.duplicate_phones().len(), expected);
        assert_eq!(agg.duplicate_phones(), vec!["2", "3"]);
        assert_eq!(agg.unique_customers().len(), 3);

        let groups = agg.duplicate_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].records.len(), 3);
    }
}
