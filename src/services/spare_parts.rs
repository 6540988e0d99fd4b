//! Spare-parts inventory management service

use uuid::Uuid;

use crate::{
    error::{push_field, AppError, AppResult, FieldErrors},
    models::{CreateSparePart, SparePart, UpdateSparePart},
    repository::Repository,
};

#[derive(Clone)]
pub struct SparePartsService {
    repository: Repository,
}

impl SparePartsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<SparePart>> {
        self.repository.spare_parts.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<SparePart> {
        self.repository
            .spare_parts
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Spare part {} not found", id)))
    }

    pub async fn create(&self, input: &CreateSparePart) -> AppResult<SparePart> {
        let mut errors = FieldErrors::new();
        if input.part_number.trim().is_empty() {
            push_field(&mut errors, "partNumber", "Part number is required");
        }
        if input.description.trim().is_empty() {
            push_field(&mut errors, "description", "Description is required");
        }
        if input.quantity < 0 {
            push_field(&mut errors, "quantity", "Quantity must be non-negative");
        }
        if input.location.trim().is_empty() {
            push_field(&mut errors, "location", "Location is required");
        }
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        self.repository.spare_parts.create(input).await
    }

    pub async fn update(&self, id: Uuid, patch: &UpdateSparePart) -> AppResult<SparePart> {
        let mut errors = FieldErrors::new();
        if matches!(patch.part_number.as_deref(), Some(s) if s.trim().is_empty()) {
            push_field(&mut errors, "partNumber", "Part number is required");
        }
        if matches!(patch.description.as_deref(), Some(s) if s.trim().is_empty()) {
            push_field(&mut errors, "description", "Description is required");
        }
        if matches!(patch.quantity, Some(q) if q < 0) {
            push_field(&mut errors, "quantity", "Quantity must be non-negative");
        }
        if matches!(patch.location.as_deref(), Some(s) if s.trim().is_empty()) {
            push_field(&mut errors, "location", "Location is required");
        }
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        self.repository
            .spare_parts
            .update(id, patch)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Spare part {} not found", id)))
    }

    /// Delete a spare part. Existing breakdown records keep their
    /// denormalized consumption snapshots; nothing cascades.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.repository.spare_parts.delete(id).await? {
            return Err(AppError::NotFound(format!("Spare part {} not found", id)));
        }
        Ok(())
    }
}
