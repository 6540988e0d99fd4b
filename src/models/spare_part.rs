//! Spare part model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Inventory record for a spare part
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SparePart {
    pub id: Uuid,
    /// Display/lookup key, not enforced unique
    pub part_number: String,
    pub description: String,
    /// Units on hand, never negative
    pub quantity: i32,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create spare part request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSparePart {
    pub part_number: String,
    pub description: String,
    pub quantity: i32,
    pub location: String,
}

/// Partial update request; only supplied fields are applied
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSparePart {
    pub part_number: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub location: Option<String>,
}

impl UpdateSparePart {
    /// Patch that only changes the stock quantity
    pub fn quantity(quantity: i32) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }
}
