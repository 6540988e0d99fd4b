//! Breakdown incident model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::enums::BreakdownCategory;

/// Point-in-time record of a spare part consumed by a breakdown.
///
/// `part_number` and `description` are denormalized snapshots taken when the
/// breakdown was created, so the record stays meaningful even after the
/// referenced part is edited or deleted. The reference is weak: no
/// referential integrity is enforced after the fact.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpareConsumption {
    pub spare_part_id: Uuid,
    pub part_number: String,
    pub description: String,
    pub quantity_consumed: i32,
}

/// Recorded equipment-failure incident
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub id: Uuid,
    /// Downtime in minutes
    pub loss_time: i32,
    pub line: String,
    pub machine: String,
    pub description: String,
    pub category: BreakdownCategory,
    pub spares_consumed: Vec<SpareConsumption>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One consumption item in a create request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionRequest {
    pub spare_part_id: Uuid,
    pub quantity_consumed: i32,
}

/// Create breakdown request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBreakdown {
    pub loss_time: i32,
    pub line: String,
    pub machine: String,
    pub description: String,
    pub category: BreakdownCategory,
    #[serde(default)]
    pub spares_consumed: Vec<ConsumptionRequest>,
}

/// Fully validated breakdown ready for insertion, with consumption
/// snapshots already resolved. Built only by the lifecycle service;
/// the store assigns the id and timestamps.
#[derive(Debug, Clone)]
pub struct NewBreakdown {
    pub loss_time: i32,
    pub line: String,
    pub machine: String,
    pub description: String,
    pub category: BreakdownCategory,
    pub spares_consumed: Vec<SpareConsumption>,
}
