// src/db/customer_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::customer::{Customer, CustomerPayload, RecordStatus, Tier},
};

const CUSTOMER_COLUMNS: &str = r#"
    id, name, phone, email, birthday, tier, loyalty_points, total_visits,
    total_spent, status, join_date, last_visit, created_at, updated_at
"#;

#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Every row, duplicates included. Aggregation happens in memory.
    pub async fn list_all(&self) -> Result<Vec<Customer>, AppError> {
        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(customers)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(customer)
    }

    /// Same as `find_by_id`, holding a row lock until the transaction ends.
    pub async fn lock_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>(&lock_query())
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(customer)
    }

    /// Rows sharing a phone, newest first.
    pub async fn find_by_phone<'e, E>(&self, executor: E, phone: &str) -> Result<Vec<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE phone = $1 ORDER BY created_at DESC"
        ))
        .bind(phone)
        .fetch_all(executor)
        .await?;
        Ok(customers)
    }

    pub async fn create<'e, E>(&self, executor: E, input: &CustomerPayload) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            r#"
            INSERT INTO customers (name, phone, email, birthday, status, join_date)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, CURRENT_DATE))
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(input.birthday)
        .bind(input.status.unwrap_or(RecordStatus::Active))
        .bind(input.join_date)
        .fetch_one(executor)
        .await?;
        Ok(customer)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &CustomerPayload,
    ) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            r#"
            UPDATE customers SET
                name = $2, phone = $3, email = $4, birthday = $5,
                status = COALESCE($6, status),
                join_date = COALESCE($7, join_date),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(input.birthday)
        .bind(input.status)
        .bind(input.join_date)
        .fetch_optional(executor)
        .await?;
        Ok(customer)
    }

    pub async fn set_points<'e, E>(&self, executor: E, id: Uuid, points: i32) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            r#"
            UPDATE customers SET loyalty_points = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(points)
        .fetch_one(executor)
        .await?;
        Ok(customer)
    }

    pub async fn set_tier<'e, E>(&self, executor: E, id: Uuid, tier: Tier) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            r#"
            UPDATE customers SET tier = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(tier)
        .fetch_one(executor)
        .await?;
        Ok(customer)
    }

    /// Credits a completed visit to the current record of a phone.
    /// Returns how many rows were touched (0 when the phone is unknown).
    pub async fn record_visit<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
        amount: rust_decimal::Decimal,
        visit_date: chrono::NaiveDate,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE customers SET
                total_visits = total_visits + 1,
                total_spent = total_spent + $2,
                last_visit = GREATEST(COALESCE(last_visit, $3), $3),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(customer_id)
        .bind(amount)
        .bind(visit_date)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn lock_query() -> String {
    format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1 FOR UPDATE")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_query_takes_a_row_lock() {
        assert!(lock_query().trim_end().ends_with("FOR UPDATE"));
    }
}
