// src/analytics/loyalty.rs

use rust_decimal::Decimal;

use crate::models::{
    customer::{Customer, RecordStatus, Tier},
    loyalty::{LoyaltyStats, TierBenefit, TierCounts},
};

/// Spend at or above this marks a high-value customer.
pub const HIGH_VALUE_SPEND: i64 = 10_000;

/// Static tier table: spend ranges (₹, lower bound inclusive) and discounts.
pub fn tier_table() -> [TierBenefit; 4] {
    [
        TierBenefit {
            tier: Tier::Bronze,
            min_spend: Decimal::ZERO,
            max_spend: Some(Decimal::from(5_000)),
            discount_percent: 5,
        },
        TierBenefit {
            tier: Tier::Silver,
            min_spend: Decimal::from(5_000),
            max_spend: Some(Decimal::from(15_000)),
            discount_percent: 10,
        },
        TierBenefit {
            tier: Tier::Gold,
            min_spend: Decimal::from(15_000),
            max_spend: Some(Decimal::from(30_000)),
            discount_percent: 15,
        },
        TierBenefit {
            tier: Tier::Platinum,
            min_spend: Decimal::from(30_000),
            max_spend: None,
            discount_percent: 20,
        },
    ]
}

impl Tier {
    pub fn benefit(self) -> TierBenefit {
        let row = match self {
            Tier::Bronze => 0,
            Tier::Silver => 1,
            Tier::Gold => 2,
            Tier::Platinum => 3,
        };
        tier_table()[row]
    }

    pub fn discount_percent(self) -> u8 {
        self.benefit().discount_percent
    }

    /// The highest tier whose lower bound the spend reaches.
    pub fn for_spend(total_spent: Decimal) -> Tier {
        tier_table()
            .into_iter()
            .rev()
            .find(|b| total_spent >= b.min_spend)
            .map_or(Tier::Bronze, |b| b.tier)
    }
}

pub struct LoyaltyTierCalculator;

impl LoyaltyTierCalculator {
    pub fn stats(customers: &[Customer]) -> LoyaltyStats {
        let mut tiers = TierCounts { bronze: 0, silver: 0, gold: 0, platinum: 0 };
        let mut total_points: i64 = 0;
        let mut high_value_customers = 0;
        let mut active_customers = 0;
        let threshold = Decimal::from(HIGH_VALUE_SPEND);

        for c in customers {
            match c.tier {
                Tier::Bronze => tiers.bronze += 1,
                Tier::Silver => tiers.silver += 1,
                Tier::Gold => tiers.gold += 1,
                Tier::Platinum => tiers.platinum += 1,
            }
            total_points += i64::from(c.loyalty_points);
            if c.total_spent >= threshold {
                high_value_customers += 1;
            }
            if c.status == RecordStatus::Active {
                active_customers += 1;
            }
        }

        let average_points = if customers.is_empty() {
            0.0
        } else {
            total_points as f64 / customers.len() as f64
        };

        LoyaltyStats {
            tiers,
            total_points,
            average_points,
            high_value_customers,
            active_customers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::customer;

    #[test]
    fn empty_list_has_zero_average() {
        let stats = LoyaltyTierCalculator::stats(&[]);
        assert_eq!(stats.tiers.total(), 0);
        assert_eq!(stats.total_points, 0);
        assert_eq!(stats.average_points, 0.0);
    }

    #[test]
    fn tier_counts_add_up_to_customer_count() {
        let mut a = customer("A", "1");
        a.tier = Tier::Gold;
        a.loyalty_points = 100;
        a.total_spent = Decimal::from(20_000);
        let mut b = customer("B", "2");
        b.tier = Tier::Platinum;
        b.loyalty_points = 300;
        b.total_spent = Decimal::from(10_000);
        let mut c = customer("C", "3");
        c.status = RecordStatus::Inactive;
        c.loyalty_points = 20;
        c.total_spent = Decimal::from(9_999);

        let customers = vec![a, b, c];
        let stats = LoyaltyTierCalculator::stats(&customers);

        assert_eq!(stats.tiers.total(), customers.len());
        assert_eq!(stats.tiers.gold, 1);
        assert_eq!(stats.tiers.platinum, 1);
        assert_eq!(stats.tiers.bronze, 1);
        assert_eq!(stats.total_points, 420);
        assert_eq!(stats.average_points, 140.0);
        assert_eq!(stats.high_value_customers, 2);
        assert_eq!(stats.active_customers, 2);
    }

    #[test]
    fn tier_lookup_uses_inclusive_lower_bounds() {
        assert_eq!(Tier::for_spend(Decimal::ZERO), Tier::Bronze);
        assert_eq!(Tier::for_spend(Decimal::from(4_999)), Tier::Bronze);
        assert_eq!(Tier::for_spend(Decimal::from(5_000)), Tier::Silver);
        assert_eq!(Tier::for_spend(Decimal::from(15_000)), Tier::Gold);
        assert_eq!(Tier::for_spend(Decimal::from(30_000)), Tier::Platinum);
        assert_eq!(Tier::for_spend(Decimal::from(250_000)), Tier::Platinum);
    }

    #[test]
    fn discounts_follow_the_table() {
        assert_eq!(Tier::Bronze.discount_percent(), 5);
        assert_eq!(Tier::Silver.discount_percent(), 10);
        assert_eq!(Tier::Gold.discount_percent(), 15);
        assert_eq!(Tier::Platinum.discount_percent(), 20);
        assert_eq!(Tier::Platinum.benefit().max_spend, None);
    }
}
