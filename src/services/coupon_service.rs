// src/services/coupon_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CouponRepository,
    models::{
        coupon::{Coupon, CouponPayload, CouponQuote, DiscountKind},
        customer::RecordStatus,
    },
};

#[derive(Clone)]
pub struct CouponService {
    repo: CouponRepository,
}

impl CouponService {
    pub fn new(repo: CouponRepository) -> Self {
        Self { repo }
    }

    pub async fn list_coupons(&self) -> Result<Vec<Coupon>, AppError> {
        self.repo.list().await
    }

    pub async fn create_coupon(&self, input: &CouponPayload) -> Result<Coupon, AppError> {
        check_definition(input)?;
        self.repo.create(&normalize_code(&input.code), input).await
    }

    pub async fn delete_coupon(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::ResourceNotFound(format!("Coupon {}", id)));
        }
        Ok(())
    }

    /// Prices `amount` with the coupon; with `redeem` the use is also counted.
    pub async fn quote(
        &self,
        code: &str,
        amount: Decimal,
        today: NaiveDate,
        redeem: bool,
    ) -> Result<CouponQuote, AppError> {
        let code = normalize_code(code);
        let coupon = self
            .repo
            .find_by_code(&code)
            .await?
            .ok_or_else(|| AppError::CouponRejected(format!("Unknown coupon '{}'", code)))?;

        let quote = evaluate(&coupon, amount, today)?;

        if redeem && self.repo.redeem(coupon.id).await?.is_none() {
            return Err(AppError::CouponRejected("Usage limit reached".into()));
        }
        Ok(quote)
    }
}

pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

fn check_definition(input: &CouponPayload) -> Result<(), AppError> {
    if input.valid_until < input.valid_from {
        return Err(AppError::BadRequest("validUntil is before validFrom".into()));
    }
    if input.discount_value <= Decimal::ZERO {
        return Err(AppError::BadRequest("discountValue must be positive".into()));
    }
    if input.discount_kind == DiscountKind::Percentage && input.discount_value > Decimal::ONE_HUNDRED {
        return Err(AppError::BadRequest("a percentage discount cannot exceed 100".into()));
    }
    Ok(())
}

/// Applies every rule of a coupon to a bill. The discount never exceeds the bill.
pub fn evaluate(coupon: &Coupon, amount: Decimal, today: NaiveDate) -> Result<CouponQuote, AppError> {
    if coupon.status != RecordStatus::Active {
        return Err(AppError::CouponRejected("Coupon is inactive".into()));
    }
    if today < coupon.valid_from || today > coupon.valid_until {
        return Err(AppError::CouponRejected("Coupon is not valid today".into()));
    }
    if coupon.usage_limit.is_some_and(|limit| coupon.used_count >= limit) {
        return Err(AppError::CouponRejected("Usage limit reached".into()));
    }
    if amount < coupon.min_purchase {
        return Err(AppError::CouponRejected(format!(
            "Minimum purchase is {}",
            coupon.min_purchase
        )));
    }

    let raw = match coupon.discount_kind {
        DiscountKind::Percentage => amount * coupon.discount_value / Decimal::ONE_HUNDRED,
        DiscountKind::Fixed => coupon.discount_value,
    };
    let discount = raw.min(amount).round_dp(2);

    Ok(CouponQuote {
        code: coupon.code.clone(),
        amount,
        discount,
        final_amount: amount - discount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{date, instant};

    fn coupon(kind: DiscountKind, value: i64) -> Coupon {
        Coupon {
            id: Uuid::new_v4(),
            code: "DIWALI20".into(),
            description: None,
            discount_kind: kind,
            discount_value: Decimal::from(value),
            min_purchase: Decimal::from(1000),
            valid_from: date(2025, 10, 1),
            valid_until: date(2025, 10, 31),
            usage_limit: Some(100),
            used_count: 0,
            status: RecordStatus::Active,
            created_at: instant(2025, 9, 30),
        }
    }

    fn definition(kind: DiscountKind, value: i64) -> CouponPayload {
        CouponPayload {
            code: "DIWALI20".into(),
            description: None,
            discount_kind: kind,
            discount_value: Decimal::from(value),
            min_purchase: Decimal::ZERO,
            valid_from: date(2025, 10, 1),
            valid_until: date(2025, 10, 31),
            usage_limit: None,
        }
    }

    #[test]
    fn sound_definitions_pass() {
        assert!(check_definition(&definition(DiscountKind::Percentage, 100)).is_ok());
        assert!(check_definition(&definition(DiscountKind::Fixed, 2500)).is_ok());

        let mut one_day = definition(DiscountKind::Fixed, 200);
        one_day.valid_until = one_day.valid_from;
        assert!(check_definition(&one_day).is_ok());
    }

    #[test]
    fn inverted_window_is_rejected() {
        let mut d = definition(DiscountKind::Fixed, 200);
        d.valid_until = date(2025, 9, 30);
        assert!(matches!(check_definition(&d), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn percentage_above_one_hundred_is_rejected() {
        assert!(check_definition(&definition(DiscountKind::Percentage, 101)).is_err());
        // A fixed amount has no such ceiling
        assert!(check_definition(&definition(DiscountKind::Fixed, 101)).is_ok());
    }

    #[test]
    fn zero_or_negative_discount_is_rejected() {
        assert!(check_definition(&definition(DiscountKind::Fixed, 0)).is_err());
        assert!(check_definition(&definition(DiscountKind::Percentage, -5)).is_err());
    }

    #[test]
    fn percentage_coupon_discounts_the_bill() {
        let quote = evaluate(&coupon(DiscountKind::Percentage, 20), Decimal::from(2500), date(2025, 10, 20)).unwrap();
        assert_eq!(quote.discount, Decimal::from(500));
        assert_eq!(quote.final_amount, Decimal::from(2000));
    }

    #[test]
    fn fixed_discount_is_capped_at_the_bill() {
        let mut c = coupon(DiscountKind::Fixed, 5000);
        c.min_purchase = Decimal::ZERO;
        let quote = evaluate(&c, Decimal::from(1200), date(2025, 10, 20)).unwrap();
        assert_eq!(quote.discount, Decimal::from(1200));
        assert_eq!(quote.final_amount, Decimal::ZERO);
    }

    #[test]
    fn coupon_outside_its_window_is_rejected() {
        let c = coupon(DiscountKind::Percentage, 20);
        assert!(evaluate(&c, Decimal::from(2000), date(2025, 9, 30)).is_err());
        assert!(evaluate(&c, Decimal::from(2000), date(2025, 11, 1)).is_err());
        assert!(evaluate(&c, Decimal::from(2000), date(2025, 10, 31)).is_ok());
    }

    #[test]
    fn exhausted_or_inactive_coupons_are_rejected() {
        let mut used_up = coupon(DiscountKind::Fixed, 100);
        used_up.used_count = 100;
        assert!(matches!(
            evaluate(&used_up, Decimal::from(2000), date(2025, 10, 5)),
            Err(AppError::CouponRejected(_))
        ));

        let mut inactive = coupon(DiscountKind::Fixed, 100);
        inactive.status = RecordStatus::Inactive;
        assert!(evaluate(&inactive, Decimal::from(2000), date(2025, 10, 5)).is_err());
    }

    #[test]
    fn bill_below_minimum_is_rejected() {
        let c = coupon(DiscountKind::Percentage, 10);
        assert!(evaluate(&c, Decimal::from(999), date(2025, 10, 5)).is_err());
    }

    #[test]
    fn codes_are_normalised() {
        assert_eq!(normalize_code("  diwali20 "), "DIWALI20");
    }
}
