// src/services/staff_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::StaffRepository,
    models::staff::{Staff, StaffPayload},
};

#[derive(Clone)]
pub struct StaffService {
    repo: StaffRepository,
}

impl StaffService {
    pub fn new(repo: StaffRepository) -> Self {
        Self { repo }
    }

    pub async fn list_staff(&self) -> Result<Vec<Staff>, AppError> {
        self.repo.list().await
    }

    pub async fn get_staff(&self, id: Uuid) -> Result<Staff, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Staff member {}", id)))
    }

    pub async fn create_staff(&self, input: &StaffPayload) -> Result<Staff, AppError> {
        let staff = self.repo.create(input).await?;
        tracing::info!(staff_id = %staff.id, "Staff member added");
        Ok(staff)
    }

    pub async fn update_staff(&self, id: Uuid, input: &StaffPayload) -> Result<Staff, AppError> {
        self.repo
            .update(id, input)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Staff member {}", id)))
    }

    pub async fn delete_staff(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::ResourceNotFound(format!("Staff member {}", id)));
        }
        Ok(())
    }
}
