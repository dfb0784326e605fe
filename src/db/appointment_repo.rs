// src/db/appointment_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::appointment::{Appointment, AppointmentPayload, AppointmentStatus},
};

const APPOINTMENT_COLUMNS: &str = r#"
    id, customer_name, customer_phone, service, staff, date, time,
    status, price, notes, created_at
"#;

#[derive(Clone)]
pub struct AppointmentRepository {
    pool: PgPool,
}

impl AppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Appointment>, AppError> {
        let appointments = sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments ORDER BY date DESC, time DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(appointments)
    }

    pub async fn list_by_date(&self, date: chrono::NaiveDate) -> Result<Vec<Appointment>, AppError> {
        let appointments = sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE date = $1 ORDER BY time ASC"
        ))
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(appointments)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Appointment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appointment = sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(appointment)
    }

    /// Same as `find_by_id`, holding a row lock until the transaction ends.
    pub async fn lock_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Appointment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appointment = sqlx::query_as::<_, Appointment>(&lock_query())
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(appointment)
    }

    pub async fn create<'e, E>(&self, executor: E, input: &AppointmentPayload) -> Result<Appointment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appointment = sqlx::query_as::<_, Appointment>(&format!(
            r#"
            INSERT INTO appointments (
                customer_name, customer_phone, service, staff, date, time, price, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        ))
        .bind(&input.customer_name)
        .bind(&input.customer_phone)
        .bind(&input.service)
        .bind(&input.staff)
        .bind(input.date)
        .bind(input.time)
        .bind(input.price)
        .bind(&input.notes)
        .fetch_one(executor)
        .await?;
        Ok(appointment)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &AppointmentPayload,
    ) -> Result<Option<Appointment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appointment = sqlx::query_as::<_, Appointment>(&format!(
            r#"
            UPDATE appointments SET
                customer_name = $2, customer_phone = $3, service = $4, staff = $5,
                date = $6, time = $7, price = $8, notes = $9
            WHERE id = $1
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&input.customer_name)
        .bind(&input.customer_phone)
        .bind(&input.service)
        .bind(&input.staff)
        .bind(input.date)
        .bind(input.time)
        .bind(input.price)
        .bind(&input.notes)
        .fetch_optional(executor)
        .await?;
        Ok(appointment)
    }

    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appointment = sqlx::query_as::<_, Appointment>(&format!(
            "UPDATE appointments SET status = $2 WHERE id = $1 RETURNING {APPOINTMENT_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_one(executor)
        .await?;
        Ok(appointment)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn lock_query() -> String {
    format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1 FOR UPDATE")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_query_takes_a_row_lock() {
        let sql = lock_query();
        assert!(sql.contains("WHERE id = $1"));
        assert!(sql.trim_end().ends_with("FOR UPDATE"));
    }
}
