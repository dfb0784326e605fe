// src/services/customer_service.rs

use uuid::Uuid;

use crate::{
    analytics::CustomerAggregator,
    common::error::AppError,
    db::CustomerRepository,
    models::customer::{Customer, CustomerPayload, DuplicateGroup},
};

#[derive(Clone)]
pub struct CustomerService {
    repo: CustomerRepository,
    pool: sqlx::PgPool,
}

impl CustomerService {
    pub fn new(repo: CustomerRepository, pool: sqlx::PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        self.repo.list_all().await
    }

    /// One row per phone: the latest record of each duplicate group.
    pub async fn list_unique_customers(&self) -> Result<Vec<Customer>, AppError> {
        let customers = self.repo.list_all().await?;
        let unique = CustomerAggregator::new(&customers)
            .unique_customers()
            .into_iter()
            .cloned()
            .collect();
        Ok(unique)
    }

    pub async fn get_customer(&self, id: Uuid) -> Result<Customer, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Customer {}", id)))
    }

    // Duplicates are allowed on purpose: a repeated phone creates another row
    // and shows up in the duplicates report for manual review.
    pub async fn create_customer(&self, input: &CustomerPayload) -> Result<Customer, AppError> {
        let existing = self.repo.find_by_phone(&self.pool, &input.phone).await?;
        let customer = self.repo.create(&self.pool, input).await?;

        if !existing.is_empty() {
            tracing::warn!(
                phone = %customer.phone,
                records = existing.len() + 1,
                "Customer phone already on file; duplicate row created"
            );
        }
        Ok(customer)
    }

    pub async fn update_customer(&self, id: Uuid, input: &CustomerPayload) -> Result<Customer, AppError> {
        self.repo
            .update(&self.pool, id, input)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Customer {}", id)))
    }

    pub async fn delete_customer(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(&self.pool, id).await? {
            return Err(AppError::ResourceNotFound(format!("Customer {}", id)));
        }
        Ok(())
    }

    pub async fn duplicate_groups(&self) -> Result<Vec<DuplicateGroup>, AppError> {
        let customers = self.repo.list_all().await?;
        Ok(CustomerAggregator::new(&customers).duplicate_groups())
    }
}
