//! Store abstraction and its implementations.
//!
//! Both entity collections share the same contract: newest-first listing,
//! `Option`/`bool` signaling for missing records, partial updates that
//! refresh the update timestamp. The lifecycle and KPI services only see
//! these traits, so they can run against the Postgres store or the
//! in-memory one interchangeably.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Breakdown, CreateSparePart, NewBreakdown, SparePart, UpdateSparePart},
};

#[async_trait]
pub trait SparePartStore: Send + Sync {
    /// All spare parts, newest first
    async fn list(&self) -> AppResult<Vec<SparePart>>;

    /// `None` when the part does not exist; absence is a normal outcome
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<SparePart>>;

    /// Store a new part with a fresh id and current timestamps
    async fn create(&self, input: &CreateSparePart) -> AppResult<SparePart>;

    /// Apply only the supplied fields and refresh the update timestamp.
    /// `None` when the part does not exist.
    async fn update(&self, id: Uuid, patch: &UpdateSparePart) -> AppResult<Option<SparePart>>;

    /// `false` when no record was removed
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait BreakdownStore: Send + Sync {
    /// All breakdowns, newest first
    async fn list(&self) -> AppResult<Vec<Breakdown>>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Breakdown>>;

    /// Store a fully validated breakdown with its consumption snapshots.
    /// Breakdown records are immutable once committed; there is no update.
    async fn create(&self, record: &NewBreakdown) -> AppResult<Breakdown>;

    /// `false` when no record was removed
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Injected store handles for the service layer
#[derive(Clone)]
pub struct Repository {
    pub spare_parts: Arc<dyn SparePartStore>,
    pub breakdowns: Arc<dyn BreakdownStore>,
}

impl Repository {
    /// Durable Postgres-backed stores (the reference implementation)
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self {
            spare_parts: Arc::new(postgres::PgSparePartStore::new(pool.clone())),
            breakdowns: Arc::new(postgres::PgBreakdownStore::new(pool)),
        }
    }

    /// Ephemeral in-process stores, used as the test double and the
    /// development fallback
    pub fn in_memory() -> Self {
        Self {
            spare_parts: Arc::new(memory::MemorySparePartStore::default()),
            breakdowns: Arc::new(memory::MemoryBreakdownStore::default()),
        }
    }
}
