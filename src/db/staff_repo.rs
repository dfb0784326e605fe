// src/db/staff_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        customer::RecordStatus,
        staff::{Staff, StaffPayload},
    },
};

#[derive(Clone)]
pub struct StaffRepository {
    pool: PgPool,
}

impl StaffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Staff>, AppError> {
        let staff = sqlx::query_as::<_, Staff>("SELECT * FROM staff ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(staff)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Staff>, AppError> {
        let staff = sqlx::query_as::<_, Staff>("SELECT * FROM staff WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(staff)
    }

    pub async fn create(&self, input: &StaffPayload) -> Result<Staff, AppError> {
        let staff = sqlx::query_as::<_, Staff>(
            r#"
            INSERT INTO staff (name, phone, email, position, specialization, status, join_date)
            VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, CURRENT_DATE))
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.position)
        .bind(&input.specialization)
        .bind(input.status.unwrap_or(RecordStatus::Active))
        .bind(input.join_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(staff)
    }

    pub async fn update(&self, id: Uuid, input: &StaffPayload) -> Result<Option<Staff>, AppError> {
        let staff = sqlx::query_as::<_, Staff>(
            r#"
            UPDATE staff SET
                name = $2, phone = $3, email = $4, position = $5, specialization = $6,
                status = COALESCE($7, status),
                join_date = COALESCE($8, join_date)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.position)
        .bind(&input.specialization)
        .bind(input.status)
        .bind(input.join_date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(staff)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM staff WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
