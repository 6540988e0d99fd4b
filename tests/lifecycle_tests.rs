//! Breakdown lifecycle and inventory consistency tests, run against the
//! in-memory stores through the same service layer the API uses.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use maintrack_server::{
    config::DashboardConfig,
    error::{AppError, AppResult},
    models::{
        BreakdownCategory, ConsumptionRequest, CreateBreakdown, CreateSparePart, SparePart,
        UpdateSparePart,
    },
    repository::{
        memory::{MemoryBreakdownStore, MemorySparePartStore},
        Repository, SparePartStore,
    },
    services::Services,
};
use uuid::Uuid;

fn services() -> Services {
    Services::new(Repository::in_memory(), DashboardConfig::default())
}

async fn seed_part(services: &Services, part_number: &str, quantity: i32) -> Uuid {
    services
        .spare_parts
        .create(&CreateSparePart {
            part_number: part_number.to_string(),
            description: format!("{} bearing", part_number),
            quantity,
            location: "Rack A".to_string(),
        })
        .await
        .expect("seed part")
        .id
}

fn draft(machine: &str, loss_time: i32, spares: Vec<ConsumptionRequest>) -> CreateBreakdown {
    CreateBreakdown {
        loss_time,
        line: "Line 1".to_string(),
        machine: machine.to_string(),
        description: "drive seized".to_string(),
        category: BreakdownCategory::Mechanical,
        spares_consumed: spares,
    }
}

#[tokio::test]
async fn create_and_delete_restore_inventory() {
    let services = services();
    let part_id = seed_part(&services, "SP-001", 10).await;

    let breakdown = services
        .breakdowns
        .create(&draft(
            "Press",
            45,
            vec![ConsumptionRequest {
                spare_part_id: part_id,
                quantity_consumed: 3,
            }],
        ))
        .await
        .expect("create breakdown");

    assert_eq!(breakdown.spares_consumed.len(), 1);
    assert_eq!(breakdown.spares_consumed[0].part_number, "SP-001");
    assert_eq!(breakdown.spares_consumed[0].quantity_consumed, 3);

    let part = services.spare_parts.get_by_id(part_id).await.unwrap();
    assert_eq!(part.quantity, 7);

    assert!(services.breakdowns.delete(breakdown.id).await.unwrap());

    let part = services.spare_parts.get_by_id(part_id).await.unwrap();
    assert_eq!(part.quantity, 10);
}

#[tokio::test]
async fn consuming_exact_stock_leaves_zero() {
    let services = services();
    let part_id = seed_part(&services, "SP-002", 4).await;

    services
        .breakdowns
        .create(&draft(
            "Press",
            10,
            vec![ConsumptionRequest {
                spare_part_id: part_id,
                quantity_consumed: 4,
            }],
        ))
        .await
        .expect("consume full stock");

    let part = services.spare_parts.get_by_id(part_id).await.unwrap();
    assert_eq!(part.quantity, 0);
}

#[tokio::test]
async fn insufficient_stock_rejects_without_mutation() {
    let services = services();
    let part_id = seed_part(&services, "SP-003", 2).await;

    let err = services
        .breakdowns
        .create(&draft(
            "Press",
            10,
            vec![ConsumptionRequest {
                spare_part_id: part_id,
                quantity_consumed: 3,
            }],
        ))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::InsufficientStock {
            available: 2,
            requested: 3,
            ..
        }
    ));

    let part = services.spare_parts.get_by_id(part_id).await.unwrap();
    assert_eq!(part.quantity, 2);
    assert!(services.breakdowns.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn failing_item_leaves_earlier_items_untouched() {
    let services = services();
    let first = seed_part(&services, "SP-010", 10).await;
    let second = seed_part(&services, "SP-011", 1).await;

    let err = services
        .breakdowns
        .create(&draft(
            "Press",
            10,
            vec![
                ConsumptionRequest {
                    spare_part_id: first,
                    quantity_consumed: 2,
                },
                ConsumptionRequest {
                    spare_part_id: second,
                    quantity_consumed: 5,
                },
            ],
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InsufficientStock { .. }));

    // All-or-nothing: the first part keeps its stock even though it came
    // before the failing item.
    let part = services.spare_parts.get_by_id(first).await.unwrap();
    assert_eq!(part.quantity, 10);
    assert!(services.breakdowns.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_part_entries_are_summed() {
    let services = services();
    let part_id = seed_part(&services, "SP-020", 5).await;

    // 3 + 3 exceeds the 5 on hand even though each item alone fits.
    let err = services
        .breakdowns
        .create(&draft(
            "Press",
            10,
            vec![
                ConsumptionRequest {
                    spare_part_id: part_id,
                    quantity_consumed: 3,
                },
                ConsumptionRequest {
                    spare_part_id: part_id,
                    quantity_consumed: 3,
                },
            ],
        ))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::InsufficientStock {
            available: 5,
            requested: 6,
            ..
        }
    ));

    let breakdown = services
        .breakdowns
        .create(&draft(
            "Press",
            10,
            vec![
                ConsumptionRequest {
                    spare_part_id: part_id,
                    quantity_consumed: 2,
                },
                ConsumptionRequest {
                    spare_part_id: part_id,
                    quantity_consumed: 2,
                },
            ],
        ))
        .await
        .expect("summed consumption fits");

    assert_eq!(breakdown.spares_consumed.len(), 2);
    let part = services.spare_parts.get_by_id(part_id).await.unwrap();
    assert_eq!(part.quantity, 1);
}

#[tokio::test]
async fn unknown_part_aborts_creation() {
    let services = services();
    let part_id = seed_part(&services, "SP-030", 10).await;
    let missing = Uuid::new_v4();

    let err = services
        .breakdowns
        .create(&draft(
            "Press",
            10,
            vec![
                ConsumptionRequest {
                    spare_part_id: part_id,
                    quantity_consumed: 2,
                },
                ConsumptionRequest {
                    spare_part_id: missing,
                    quantity_consumed: 1,
                },
            ],
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ConsumedPartMissing(id) if id == missing));

    let part = services.spare_parts.get_by_id(part_id).await.unwrap();
    assert_eq!(part.quantity, 10);
    assert!(services.breakdowns.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn validation_errors_are_reported_per_field() {
    let services = services();
    let part_id = seed_part(&services, "SP-040", 10).await;

    let mut input = draft(
        "  ",
        -5,
        vec![ConsumptionRequest {
            spare_part_id: part_id,
            quantity_consumed: 0,
        }],
    );
    input.description = String::new();

    let err = services.breakdowns.create(&input).await.unwrap_err();
    let AppError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    assert!(errors.contains_key("machine"));
    assert!(errors.contains_key("lossTime"));
    assert!(errors.contains_key("description"));
    assert!(errors.contains_key("sparesConsumed"));

    let part = services.spare_parts.get_by_id(part_id).await.unwrap();
    assert_eq!(part.quantity, 10);
}

#[tokio::test]
async fn breakdown_without_spares_is_valid() {
    let services = services();
    let breakdown = services
        .breakdowns
        .create(&draft("Press", 5, Vec::new()))
        .await
        .expect("create without spares");
    assert!(breakdown.spares_consumed.is_empty());
}

#[tokio::test]
async fn consumption_snapshots_survive_part_edits() {
    let services = services();
    let part_id = seed_part(&services, "SP-050", 10).await;

    let breakdown = services
        .breakdowns
        .create(&draft(
            "Press",
            10,
            vec![ConsumptionRequest {
                spare_part_id: part_id,
                quantity_consumed: 1,
            }],
        ))
        .await
        .unwrap();

    services
        .spare_parts
        .update(
            part_id,
            &UpdateSparePart {
                part_number: Some("SP-999".to_string()),
                description: Some("relabeled".to_string()),
                ..UpdateSparePart::default()
            },
        )
        .await
        .unwrap();

    let stored = services.breakdowns.get_by_id(breakdown.id).await.unwrap();
    assert_eq!(stored.spares_consumed[0].part_number, "SP-050");
    assert_eq!(stored.spares_consumed[0].description, "SP-050 bearing");
}

#[tokio::test]
async fn delete_is_idempotent() {
    let services = services();
    let part_id = seed_part(&services, "SP-060", 10).await;

    let breakdown = services
        .breakdowns
        .create(&draft(
            "Press",
            10,
            vec![ConsumptionRequest {
                spare_part_id: part_id,
                quantity_consumed: 4,
            }],
        ))
        .await
        .unwrap();

    assert!(services.breakdowns.delete(breakdown.id).await.unwrap());
    // Second delete finds nothing and must not restock again.
    assert!(!services.breakdowns.delete(breakdown.id).await.unwrap());

    let part = services.spare_parts.get_by_id(part_id).await.unwrap();
    assert_eq!(part.quantity, 10);
}

#[tokio::test]
async fn delete_skips_restock_for_since_deleted_parts() {
    let services = services();
    let part_id = seed_part(&services, "SP-070", 10).await;

    let breakdown = services
        .breakdowns
        .create(&draft(
            "Press",
            10,
            vec![ConsumptionRequest {
                spare_part_id: part_id,
                quantity_consumed: 2,
            }],
        ))
        .await
        .unwrap();

    services.spare_parts.delete(part_id).await.unwrap();

    // Deleting the breakdown still succeeds; the missing part is skipped.
    assert!(services.breakdowns.delete(breakdown.id).await.unwrap());
    assert!(services.breakdowns.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_spare_part_lookups_are_not_found() {
    let services = services();
    let missing = Uuid::new_v4();

    assert!(matches!(
        services.spare_parts.get_by_id(missing).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        services
            .spare_parts
            .update(missing, &UpdateSparePart::quantity(1))
            .await
            .unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        services.spare_parts.delete(missing).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn listings_are_newest_first() {
    let services = services();
    seed_part(&services, "SP-080", 1).await;
    seed_part(&services, "SP-081", 1).await;

    let parts = services.spare_parts.list().await.unwrap();
    assert_eq!(parts[0].part_number, "SP-081");
    assert_eq!(parts[1].part_number, "SP-080");

    services
        .breakdowns
        .create(&draft("Press", 1, Vec::new()))
        .await
        .unwrap();
    services
        .breakdowns
        .create(&draft("Mill", 1, Vec::new()))
        .await
        .unwrap();

    let breakdowns = services.breakdowns.list().await.unwrap();
    assert_eq!(breakdowns[0].machine, "Mill");
    assert_eq!(breakdowns[1].machine, "Press");
}

#[tokio::test]
async fn spare_part_validation_rejects_bad_input() {
    let services = services();
    let err = services
        .spare_parts
        .create(&CreateSparePart {
            part_number: " ".to_string(),
            description: "valve".to_string(),
            quantity: -1,
            location: "Rack B".to_string(),
        })
        .await
        .unwrap_err();

    let AppError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    assert!(errors.contains_key("partNumber"));
    assert!(errors.contains_key("quantity"));
    assert!(services.spare_parts.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_entries_overflowing_the_sum_are_rejected() {
    let services = services();
    let part_id = seed_part(&services, "SP-021", 10).await;

    // Each item is a valid positive quantity, but the per-part sum would
    // overflow i32; the request must be rejected, not wrapped.
    let err = services
        .breakdowns
        .create(&draft(
            "Press",
            10,
            vec![
                ConsumptionRequest {
                    spare_part_id: part_id,
                    quantity_consumed: 1_500_000_000,
                },
                ConsumptionRequest {
                    spare_part_id: part_id,
                    quantity_consumed: 1_500_000_000,
                },
            ],
        ))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::InsufficientStock { available: 10, .. }
    ));

    let part = services.spare_parts.get_by_id(part_id).await.unwrap();
    assert_eq!(part.quantity, 10);
    assert!(services.breakdowns.list().await.unwrap().is_empty());
}

/// Spare-part store that sabotages one specific update call, either by
/// erroring or by reporting the part as gone
struct FlakySparePartStore {
    inner: MemorySparePartStore,
    fail_on_update: usize,
    vanish: bool,
    updates: AtomicUsize,
}

impl FlakySparePartStore {
    fn new(fail_on_update: usize, vanish: bool) -> Self {
        Self {
            inner: MemorySparePartStore::default(),
            fail_on_update,
            vanish,
            updates: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl SparePartStore for FlakySparePartStore {
    async fn list(&self) -> AppResult<Vec<SparePart>> {
        self.inner.list().await
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<SparePart>> {
        self.inner.get_by_id(id).await
    }

    async fn create(&self, input: &CreateSparePart) -> AppResult<SparePart> {
        self.inner.create(input).await
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &UpdateSparePart,
    ) -> AppResult<Option<SparePart>> {
        let call = self.updates.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on_update {
            if self.vanish {
                return Ok(None);
            }
            return Err(AppError::Internal("injected store failure".to_string()));
        }
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        self.inner.delete(id).await
    }
}

fn flaky_services(fail_on_update: usize, vanish: bool) -> Services {
    let repository = Repository {
        spare_parts: Arc::new(FlakySparePartStore::new(fail_on_update, vanish)),
        breakdowns: Arc::new(MemoryBreakdownStore::default()),
    };
    Services::new(repository, DashboardConfig::default())
}

#[tokio::test]
async fn mid_apply_store_failure_restocks_earlier_decrements() {
    // Update call 1 decrements the first part, call 2 (the second part's
    // decrement) fails, call 3 is the compensating restock of the first.
    let services = flaky_services(2, false);
    let first = seed_part(&services, "SP-090", 10).await;
    let second = seed_part(&services, "SP-091", 8).await;

    let err = services
        .breakdowns
        .create(&draft(
            "Press",
            10,
            vec![
                ConsumptionRequest {
                    spare_part_id: first,
                    quantity_consumed: 2,
                },
                ConsumptionRequest {
                    spare_part_id: second,
                    quantity_consumed: 3,
                },
            ],
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Internal(_)));

    let part = services.spare_parts.get_by_id(first).await.unwrap();
    assert_eq!(part.quantity, 10);
    let part = services.spare_parts.get_by_id(second).await.unwrap();
    assert_eq!(part.quantity, 8);
    assert!(services.breakdowns.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn part_vanishing_mid_apply_restocks_and_reports_missing() {
    // The second part's decrement reports the part as gone; the first
    // part's decrement must be compensated.
    let services = flaky_services(2, true);
    let first = seed_part(&services, "SP-092", 10).await;
    let second = seed_part(&services, "SP-093", 8).await;

    let err = services
        .breakdowns
        .create(&draft(
            "Press",
            10,
            vec![
                ConsumptionRequest {
                    spare_part_id: first,
                    quantity_consumed: 2,
                },
                ConsumptionRequest {
                    spare_part_id: second,
                    quantity_consumed: 3,
                },
            ],
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ConsumedPartMissing(id) if id == second));

    let part = services.spare_parts.get_by_id(first).await.unwrap();
    assert_eq!(part.quantity, 10);
    let part = services.spare_parts.get_by_id(second).await.unwrap();
    assert_eq!(part.quantity, 8);
    assert!(services.breakdowns.list().await.unwrap().is_empty());
}
