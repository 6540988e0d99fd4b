//! Ephemeral in-process stores.
//!
//! These mirror the strict signaling of the Postgres stores (`None`/`false`
//! on missing records) so services behave identically against either
//! implementation. Used by the test suite and as a development fallback.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BreakdownStore, SparePartStore};
use crate::{
    error::AppResult,
    models::{Breakdown, CreateSparePart, NewBreakdown, SparePart, UpdateSparePart},
};

#[derive(Clone, Default)]
pub struct MemorySparePartStore {
    records: Arc<RwLock<Vec<SparePart>>>,
}

#[async_trait::async_trait]
impl SparePartStore for MemorySparePartStore {
    async fn list(&self) -> AppResult<Vec<SparePart>> {
        let records = self.records.read().await;
        // Reverse insertion order first so equal timestamps still list
        // newest insertion first after the stable sort.
        let mut result: Vec<SparePart> = records.iter().rev().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<SparePart>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, input: &CreateSparePart) -> AppResult<SparePart> {
        let now = Utc::now();
        let part = SparePart {
            id: Uuid::new_v4(),
            part_number: input.part_number.clone(),
            description: input.description.clone(),
            quantity: input.quantity,
            location: input.location.clone(),
            created_at: now,
            updated_at: now,
        };
        self.records.write().await.push(part.clone());
        Ok(part)
    }

    async fn update(&self, id: Uuid, patch: &UpdateSparePart) -> AppResult<Option<SparePart>> {
        let mut records = self.records.write().await;
        let Some(part) = records.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(ref part_number) = patch.part_number {
            part.part_number = part_number.clone();
        }
        if let Some(ref description) = patch.description {
            part.description = description.clone();
        }
        if let Some(quantity) = patch.quantity {
            part.quantity = quantity;
        }
        if let Some(ref location) = patch.location {
            part.location = location.clone();
        }
        part.updated_at = Utc::now();
        Ok(Some(part.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|p| p.id != id);
        Ok(records.len() < before)
    }
}

#[derive(Clone, Default)]
pub struct MemoryBreakdownStore {
    records: Arc<RwLock<Vec<Breakdown>>>,
}

#[async_trait::async_trait]
impl BreakdownStore for MemoryBreakdownStore {
    async fn list(&self) -> AppResult<Vec<Breakdown>> {
        let records = self.records.read().await;
        let mut result: Vec<Breakdown> = records.iter().rev().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Breakdown>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|b| b.id == id).cloned())
    }

    async fn create(&self, record: &NewBreakdown) -> AppResult<Breakdown> {
        let now = Utc::now();
        let breakdown = Breakdown {
            id: Uuid::new_v4(),
            loss_time: record.loss_time,
            line: record.line.clone(),
            machine: record.machine.clone(),
            description: record.description.clone(),
            category: record.category,
            spares_consumed: record.spares_consumed.clone(),
            created_at: now,
            updated_at: now,
        };
        self.records.write().await.push(breakdown.clone());
        Ok(breakdown)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|b| b.id != id);
        Ok(records.len() < before)
    }
}
