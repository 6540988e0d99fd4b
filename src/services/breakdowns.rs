//! Breakdown lifecycle service.
//!
//! Breakdowns are created and deleted only through this service, never by a
//! bare store insert or delete: creation must decrement consumed spare-part
//! stock and deletion must return it. All consumption is validated against
//! current stock before any quantity is written, so a rejected request
//! leaves inventory untouched. The multi-step apply phase is still not one
//! storage transaction; a failure mid-apply triggers a best-effort
//! compensating restock of the decrements already written.

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    error::{push_field, AppError, AppResult, FieldErrors},
    inventory::{self, StockError},
    models::{Breakdown, CreateBreakdown, NewBreakdown, SpareConsumption, SparePart, UpdateSparePart},
    repository::Repository,
};

#[derive(Clone)]
pub struct BreakdownsService {
    repository: Repository,
}

impl BreakdownsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Breakdown>> {
        self.repository.breakdowns.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Breakdown> {
        self.repository
            .breakdowns
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Breakdown {} not found", id)))
    }

    /// Record a breakdown, consuming the requested spare parts.
    ///
    /// Every referenced part must exist and hold enough stock for the
    /// request (summed per part, since one part may appear more than once);
    /// otherwise the whole request is rejected without touching inventory.
    pub async fn create(&self, input: &CreateBreakdown) -> AppResult<Breakdown> {
        self.validate(input)?;

        // Pre-validation pass: fetch every referenced part and check the
        // summed consumption against its stock before mutating anything.
        let mut parts: HashMap<Uuid, SparePart> = HashMap::new();
        let mut requested: HashMap<Uuid, i32> = HashMap::new();
        let mut part_order: Vec<Uuid> = Vec::new();

        for item in &input.spares_consumed {
            if !parts.contains_key(&item.spare_part_id) {
                let part = self
                    .repository
                    .spare_parts
                    .get_by_id(item.spare_part_id)
                    .await?
                    .ok_or(AppError::ConsumedPartMissing(item.spare_part_id))?;
                parts.insert(item.spare_part_id, part);
                part_order.push(item.spare_part_id);
            }
            let total = requested.entry(item.spare_part_id).or_insert(0);
            // A summed request that overflows i32 cannot possibly be
            // covered by stock; reject it instead of wrapping.
            *total = match total.checked_add(item.quantity_consumed) {
                Some(sum) => sum,
                None => {
                    let part = &parts[&item.spare_part_id];
                    return Err(AppError::InsufficientStock {
                        part_number: part.part_number.clone(),
                        available: part.quantity,
                        requested: i32::MAX,
                    });
                }
            };
        }

        let mut decrements: Vec<(Uuid, i32)> = Vec::with_capacity(part_order.len());
        for id in &part_order {
            let part = &parts[id];
            let new_quantity = inventory::validate_and_compute_decrement(part.quantity, requested[id])
                .map_err(|StockError::Insufficient { available, requested }| {
                    AppError::InsufficientStock {
                        part_number: part.part_number.clone(),
                        available,
                        requested,
                    }
                })?;
            decrements.push((*id, new_quantity));
        }

        // Snapshots keep the caller's item order and capture the part
        // metadata as read above, not as it may later become.
        let snapshots: Vec<SpareConsumption> = input
            .spares_consumed
            .iter()
            .map(|item| {
                let part = &parts[&item.spare_part_id];
                SpareConsumption {
                    spare_part_id: part.id,
                    part_number: part.part_number.clone(),
                    description: part.description.clone(),
                    quantity_consumed: item.quantity_consumed,
                }
            })
            .collect();

        // Apply phase. Any failure from here on restocks what was already
        // decremented before the error is surfaced.
        let mut applied: Vec<(Uuid, i32)> = Vec::new();
        for (id, new_quantity) in &decrements {
            match self
                .repository
                .spare_parts
                .update(*id, &UpdateSparePart::quantity(*new_quantity))
                .await
            {
                Ok(Some(_)) => applied.push((*id, requested[id])),
                Ok(None) => {
                    // Part vanished between validation and apply
                    self.compensate(&applied).await;
                    return Err(AppError::ConsumedPartMissing(*id));
                }
                Err(e) => {
                    self.compensate(&applied).await;
                    return Err(e);
                }
            }
        }

        let record = NewBreakdown {
            loss_time: input.loss_time,
            line: input.line.clone(),
            machine: input.machine.clone(),
            description: input.description.clone(),
            category: input.category,
            spares_consumed: snapshots,
        };

        match self.repository.breakdowns.create(&record).await {
            Ok(breakdown) => Ok(breakdown),
            Err(e) => {
                self.compensate(&applied).await;
                Err(e)
            }
        }
    }

    /// Delete a breakdown, returning its consumed spares to inventory.
    ///
    /// Returns `false` when the breakdown does not exist; deleting an
    /// already-deleted id performs no inventory mutation.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let Some(breakdown) = self.repository.breakdowns.get_by_id(id).await? else {
            return Ok(false);
        };

        for consumed in &breakdown.spares_consumed {
            match self
                .repository
                .spare_parts
                .get_by_id(consumed.spare_part_id)
                .await?
            {
                Some(part) => {
                    let restored = inventory::compute_restock(part.quantity, consumed.quantity_consumed);
                    if self
                        .repository
                        .spare_parts
                        .update(part.id, &UpdateSparePart::quantity(restored))
                        .await?
                        .is_none()
                    {
                        tracing::warn!(
                            breakdown_id = %id,
                            spare_part_id = %part.id,
                            "spare part disappeared while restocking, skipping"
                        );
                    }
                }
                None => {
                    // The part was deleted independently; the breakdown
                    // deletion still proceeds.
                    tracing::warn!(
                        breakdown_id = %id,
                        spare_part_id = %consumed.spare_part_id,
                        "consumed spare part no longer exists, skipping restock"
                    );
                }
            }
        }

        Ok(self.repository.breakdowns.delete(id).await?)
    }

    fn validate(&self, input: &CreateBreakdown) -> AppResult<()> {
        let mut errors = FieldErrors::new();
        if input.loss_time < 0 {
            push_field(&mut errors, "lossTime", "Loss time must be non-negative");
        }
        if input.line.trim().is_empty() {
            push_field(&mut errors, "line", "Line is required");
        }
        if input.machine.trim().is_empty() {
            push_field(&mut errors, "machine", "Machine is required");
        }
        if input.description.trim().is_empty() {
            push_field(&mut errors, "description", "Description is required");
        }
        if input
            .spares_consumed
            .iter()
            .any(|item| item.quantity_consumed <= 0)
        {
            push_field(
                &mut errors,
                "sparesConsumed",
                "Consumed quantity must be positive",
            );
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }

    /// Best-effort restock of decrements already applied by a failed create
    async fn compensate(&self, applied: &[(Uuid, i32)]) {
        for (id, quantity) in applied {
            let result = match self.repository.spare_parts.get_by_id(*id).await {
                Ok(Some(part)) => {
                    let restored = inventory::compute_restock(part.quantity, *quantity);
                    self.repository
                        .spare_parts
                        .update(*id, &UpdateSparePart::quantity(restored))
                        .await
                        .map(|_| ())
                }
                Ok(None) => Ok(()),
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                tracing::error!(
                    spare_part_id = %id,
                    quantity,
                    "failed to restock after aborted breakdown creation: {}",
                    e
                );
            }
        }
    }
}
