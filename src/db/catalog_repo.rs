// src/db/catalog_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        catalog::{SalonService, ServicePayload},
        customer::RecordStatus,
    },
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<SalonService>, AppError> {
        let services = sqlx::query_as::<_, SalonService>(
            "SELECT * FROM services ORDER BY category ASC, name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(services)
    }

    pub async fn create(&self, input: &ServicePayload) -> Result<SalonService, AppError> {
        let service = sqlx::query_as::<_, SalonService>(
            r#"
            INSERT INTO services (name, category, price, duration_minutes, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.price)
        .bind(input.duration_minutes)
        .bind(input.status.unwrap_or(RecordStatus::Active))
        .fetch_one(&self.pool)
        .await?;
        Ok(service)
    }

    pub async fn update(&self, id: Uuid, input: &ServicePayload) -> Result<Option<SalonService>, AppError> {
        let service = sqlx::query_as::<_, SalonService>(
            r#"
            UPDATE services SET
                name = $2, category = $3, price = $4, duration_minutes = $5,
                status = COALESCE($6, status)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.price)
        .bind(input.duration_minutes)
        .bind(input.status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(service)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
