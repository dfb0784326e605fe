// src/db/coupon_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::coupon::{Coupon, CouponPayload},
};

#[derive(Clone)]
pub struct CouponRepository {
    pool: PgPool,
}

impl CouponRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Coupon>, AppError> {
        let coupons = sqlx::query_as::<_, Coupon>("SELECT * FROM coupons ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(coupons)
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, AppError> {
        let coupon = sqlx::query_as::<_, Coupon>("SELECT * FROM coupons WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(coupon)
    }

    /// `code` must already be normalised (upper-case, trimmed).
    pub async fn create(&self, code: &str, input: &CouponPayload) -> Result<Coupon, AppError> {
        sqlx::query_as::<_, Coupon>(
            r#"
            INSERT INTO coupons (
                code, description, discount_kind, discount_value, min_purchase,
                valid_from, valid_until, usage_limit
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(code)
        .bind(&input.description)
        .bind(input.discount_kind)
        .bind(input.discount_value)
        .bind(input.min_purchase)
        .bind(input.valid_from)
        .bind(input.valid_until)
        .bind(input.usage_limit)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_unique_violation(e, format!("Coupon code '{}' already exists.", code)))
    }

    /// Increments used_count unless the usage limit was reached meanwhile.
    /// Returns None when the limit blocked the redemption.
    pub async fn redeem(&self, id: Uuid) -> Result<Option<Coupon>, AppError> {
        let coupon = sqlx::query_as::<_, Coupon>(
            r#"
            UPDATE coupons SET used_count = used_count + 1
            WHERE id = $1 AND (usage_limit IS NULL OR used_count < usage_limit)
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(coupon)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM coupons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
