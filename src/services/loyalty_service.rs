// src/services/loyalty_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    analytics::{loyalty::tier_table, LoyaltyTierCalculator},
    common::error::AppError,
    db::CustomerRepository,
    models::{
        customer::{Customer, Tier},
        loyalty::{LoyaltyStats, TierBenefit},
    },
};

#[derive(Clone)]
pub struct LoyaltyService {
    customer_repo: CustomerRepository,
    pool: PgPool,
}

impl LoyaltyService {
    pub fn new(customer_repo: CustomerRepository, pool: PgPool) -> Self {
        Self { customer_repo, pool }
    }

    pub async fn stats(&self) -> Result<LoyaltyStats, AppError> {
        let customers = self.customer_repo.list_all().await?;
        Ok(LoyaltyTierCalculator::stats(&customers))
    }

    pub fn tiers(&self) -> Vec<TierBenefit> {
        tier_table().to_vec()
    }

    /// Awards (positive) or redeems (negative) points. The balance never goes below zero.
    pub async fn adjust_points(&self, customer_id: Uuid, delta: i32) -> Result<Customer, AppError> {
        let mut tx = self.pool.begin().await?;

        let customer = self
            .customer_repo
            .lock_by_id(&mut *tx, customer_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Customer {}", customer_id)))?;

        let new_balance = apply_points(customer.loyalty_points, delta)?;
        let updated = self.customer_repo.set_points(&mut *tx, customer_id, new_balance).await?;

        tx.commit().await?;

        tracing::info!(
            customer_id = %customer_id,
            delta,
            balance = new_balance,
            "Loyalty points adjusted"
        );
        Ok(updated)
    }

    /// Re-derives the tier from cumulative spend using the static table.
    pub async fn recalculate_tier(&self, customer_id: Uuid) -> Result<Customer, AppError> {
        let mut tx = self.pool.begin().await?;

        let customer = self
            .customer_repo
            .lock_by_id(&mut *tx, customer_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Customer {}", customer_id)))?;

        let tier = Tier::for_spend(customer.total_spent);
        let updated = if tier == customer.tier {
            customer
        } else {
            self.customer_repo.set_tier(&mut *tx, customer_id, tier).await?
        };

        tx.commit().await?;
        Ok(updated)
    }
}

fn apply_points(balance: i32, delta: i32) -> Result<i32, AppError> {
    let new_balance = balance.saturating_add(delta);
    if new_balance < 0 {
        return Err(AppError::InsufficientPoints {
            available: balance,
            requested: delta.saturating_neg(),
        });
    }
    Ok(new_balance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn awarding_points_adds_to_the_balance() {
        assert_eq!(apply_points(100, 50).unwrap(), 150);
    }

    #[test]
    fn redeeming_down_to_zero_is_allowed() {
        assert_eq!(apply_points(80, -80).unwrap(), 0);
    }

    #[test]
    fn overdrawing_points_is_rejected() {
        match apply_points(30, -50) {
            Err(AppError::InsufficientPoints { available, requested }) => {
                assert_eq!(available, 30);
                assert_eq!(requested, 50);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
