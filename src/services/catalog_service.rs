// src/services/catalog_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::catalog::{SalonService, ServicePayload},
};

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository) -> Self {
        Self { repo }
    }

    pub async fn list_services(&self) -> Result<Vec<SalonService>, AppError> {
        self.repo.list().await
    }

    pub async fn create_service(&self, input: &ServicePayload) -> Result<SalonService, AppError> {
        self.repo.create(input).await
    }

    pub async fn update_service(&self, id: Uuid, input: &ServicePayload) -> Result<SalonService, AppError> {
        self.repo
            .update(id, input)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Service {}", id)))
    }

    pub async fn delete_service(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::ResourceNotFound(format!("Service {}", id)));
        }
        Ok(())
    }
}
