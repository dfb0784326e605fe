// src/services/inventory_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::InventoryRepository,
    models::inventory::{InventoryItem, InventoryItemPayload},
};

#[derive(Clone)]
pub struct InventoryService {
    inventory_repo: InventoryRepository,
}

impl InventoryService {
    pub fn new(inventory_repo: InventoryRepository) -> Self {
        Self { inventory_repo }
    }

    pub async fn list_items(&self) -> Result<Vec<InventoryItem>, AppError> {
        self.inventory_repo.list().await
    }

    /// Items at or below their minimum stock.
    pub async fn low_stock(&self) -> Result<Vec<InventoryItem>, AppError> {
        self.inventory_repo.list_low_stock().await
    }

    pub async fn create_item(&self, input: &InventoryItemPayload) -> Result<InventoryItem, AppError> {
        let item = self.inventory_repo.create(input).await?;
        if item.is_low_stock() {
            tracing::warn!(item = %item.name, quantity = item.quantity, "Item created below minimum stock");
        }
        Ok(item)
    }

    pub async fn update_item(&self, id: Uuid, input: &InventoryItemPayload) -> Result<InventoryItem, AppError> {
        let item = self
            .inventory_repo
            .update(id, input)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Inventory item {}", id)))?;

        if item.is_low_stock() {
            tracing::warn!(item = %item.name, quantity = item.quantity, min = item.min_stock, "Low stock");
        }
        Ok(item)
    }

    pub async fn delete_item(&self, id: Uuid) -> Result<(), AppError> {
        if !self.inventory_repo.delete(id).await? {
            return Err(AppError::ResourceNotFound(format!("Inventory item {}", id)));
        }
        Ok(())
    }
}
