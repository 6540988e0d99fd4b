//! Reliability KPI aggregation.
//!
//! The arithmetic lives in pure functions over a breakdown snapshot so it
//! can be tested without a store. The MTBF estimator is deliberately
//! coarse: it observes from the first failure onset to the end of the last
//! repair, which makes a single-failure machine report no operating time.
//! Downstream consumers depend on exactly this formula.

use chrono::Duration;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    config::DashboardConfig,
    error::AppResult,
    models::Breakdown,
    repository::Repository,
};

/// MTTR figures for one machine
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MttrEntry {
    pub machine: String,
    pub repairs: i64,
    /// Total repair time in minutes
    pub total_loss_time: i64,
    /// Mean time to repair in minutes; absent when the machine has no
    /// recorded breakdowns
    pub mttr: Option<f64>,
}

/// MTBF figures for one machine
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MtbfEntry {
    pub machine: String,
    pub failures: i64,
    /// Effective operating time in minutes (observed span minus downtime)
    pub operating_time: f64,
    /// Mean time between failures in minutes; absent when no operating
    /// time was observed
    pub mtbf: Option<f64>,
}

/// Pareto contribution of one machine
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParetoEntry {
    pub machine: String,
    /// Total loss time in minutes
    pub total_loss_time: i64,
}

/// Dashboard overview summary
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_breakdowns: i64,
    /// Minutes lost across all breakdowns
    pub total_loss_time: i64,
    pub spare_part_count: i64,
    /// Parts with quantity below the configured threshold
    pub low_stock_count: i64,
    pub low_stock_threshold: i32,
    pub recent_breakdowns: Vec<Breakdown>,
}

/// Distinct machine names (trimmed, non-empty), sorted. This is the
/// selectable set for the KPI views.
pub fn machines(breakdowns: &[Breakdown]) -> Vec<String> {
    let mut names: Vec<String> = breakdowns
        .iter()
        .map(|b| b.machine.trim().to_string())
        .filter(|m| !m.is_empty())
        .collect();
    names.sort();
    names.dedup();
    names
}

fn breakdowns_of<'a>(breakdowns: &'a [Breakdown], machine: &str) -> Vec<&'a Breakdown> {
    breakdowns
        .iter()
        .filter(|b| b.machine.trim() == machine)
        .collect()
}

/// Mean time to repair per selected machine, lowest first
pub fn mttr(breakdowns: &[Breakdown], selected: &[String]) -> Vec<MttrEntry> {
    let mut entries: Vec<MttrEntry> = selected
        .iter()
        .map(|machine| {
            let machine_breakdowns = breakdowns_of(breakdowns, machine);
            let repairs = machine_breakdowns.len() as i64;
            let total_loss_time: i64 = machine_breakdowns.iter().map(|b| b.loss_time as i64).sum();
            let mttr = if repairs > 0 {
                Some(total_loss_time as f64 / repairs as f64)
            } else {
                None
            };
            MttrEntry {
                machine: machine.clone(),
                repairs,
                total_loss_time,
                mttr,
            }
        })
        .collect();
    entries.sort_by(|a, b| {
        let a = a.mttr.unwrap_or(f64::INFINITY);
        let b = b.mttr.unwrap_or(f64::INFINITY);
        a.total_cmp(&b)
    });
    entries
}

/// Mean time between failures per selected machine, highest first.
///
/// Observed span runs from the first failure onset to the end of the last
/// repair; operating time is that span minus total downtime, floored at
/// zero.
pub fn mtbf(breakdowns: &[Breakdown], selected: &[String]) -> Vec<MtbfEntry> {
    let mut entries: Vec<MtbfEntry> = selected
        .iter()
        .map(|machine| {
            let mut machine_breakdowns = breakdowns_of(breakdowns, machine);
            machine_breakdowns.sort_by_key(|b| b.created_at);

            let failures = machine_breakdowns.len() as i64;
            if failures == 0 {
                return MtbfEntry {
                    machine: machine.clone(),
                    failures: 0,
                    operating_time: 0.0,
                    mtbf: None,
                };
            }

            let first = machine_breakdowns[0];
            let last = machine_breakdowns[machine_breakdowns.len() - 1];
            let end_of_last_repair = last.created_at + Duration::minutes(last.loss_time as i64);
            let observed_span =
                (end_of_last_repair - first.created_at).num_seconds() as f64 / 60.0;
            let total_downtime: f64 = machine_breakdowns
                .iter()
                .map(|b| b.loss_time as f64)
                .sum();

            let operating_time = (observed_span - total_downtime).max(0.0);
            let mtbf = if operating_time > 0.0 {
                Some(operating_time / failures as f64)
            } else {
                None
            };
            MtbfEntry {
                machine: machine.clone(),
                failures,
                operating_time,
                mtbf,
            }
        })
        .collect();
    entries.sort_by(|a, b| {
        let a = a.mtbf.unwrap_or(f64::NEG_INFINITY);
        let b = b.mtbf.unwrap_or(f64::NEG_INFINITY);
        b.total_cmp(&a)
    });
    entries
}

/// Loss time per selected machine, largest contributors first. Machines
/// with zero total loss time are excluded (they remain selectable).
pub fn pareto(breakdowns: &[Breakdown], selected: &[String]) -> Vec<ParetoEntry> {
    let mut entries: Vec<ParetoEntry> = selected
        .iter()
        .map(|machine| {
            let total_loss_time: i64 = breakdowns_of(breakdowns, machine)
                .iter()
                .map(|b| b.loss_time as i64)
                .sum();
            ParetoEntry {
                machine: machine.clone(),
                total_loss_time,
            }
        })
        .filter(|entry| entry.total_loss_time > 0)
        .collect();
    entries.sort_by(|a, b| b.total_loss_time.cmp(&a.total_loss_time));
    entries
}

#[derive(Clone)]
pub struct KpiService {
    repository: Repository,
    dashboard_config: DashboardConfig,
}

impl KpiService {
    pub fn new(repository: Repository, dashboard_config: DashboardConfig) -> Self {
        Self {
            repository,
            dashboard_config,
        }
    }

    pub async fn machines(&self) -> AppResult<Vec<String>> {
        let breakdowns = self.repository.breakdowns.list().await?;
        Ok(machines(&breakdowns))
    }

    pub async fn mttr(&self, selected: Option<Vec<String>>) -> AppResult<Vec<MttrEntry>> {
        let breakdowns = self.repository.breakdowns.list().await?;
        let selected = Self::selection(selected, &breakdowns);
        Ok(mttr(&breakdowns, &selected))
    }

    pub async fn mtbf(&self, selected: Option<Vec<String>>) -> AppResult<Vec<MtbfEntry>> {
        let breakdowns = self.repository.breakdowns.list().await?;
        let selected = Self::selection(selected, &breakdowns);
        Ok(mtbf(&breakdowns, &selected))
    }

    pub async fn pareto(&self, selected: Option<Vec<String>>) -> AppResult<Vec<ParetoEntry>> {
        let breakdowns = self.repository.breakdowns.list().await?;
        let selected = Self::selection(selected, &breakdowns);
        Ok(pareto(&breakdowns, &selected))
    }

    pub async fn overview(&self) -> AppResult<DashboardSummary> {
        let breakdowns = self.repository.breakdowns.list().await?;
        let spares = self.repository.spare_parts.list().await?;

        let threshold = self.dashboard_config.low_stock_threshold;
        let total_loss_time: i64 = breakdowns.iter().map(|b| b.loss_time as i64).sum();
        let low_stock_count = spares.iter().filter(|s| s.quantity < threshold).count() as i64;

        Ok(DashboardSummary {
            total_breakdowns: breakdowns.len() as i64,
            total_loss_time,
            spare_part_count: spares.len() as i64,
            low_stock_count,
            low_stock_threshold: threshold,
            recent_breakdowns: breakdowns.into_iter().take(3).collect(),
        })
    }

    /// Explicit machine filter (trimmed, deduplicated, caller order) or the
    /// full selectable set when none was given
    fn selection(selected: Option<Vec<String>>, breakdowns: &[Breakdown]) -> Vec<String> {
        match selected {
            Some(names) => {
                let mut result: Vec<String> = Vec::new();
                for name in names {
                    let name = name.trim().to_string();
                    if !name.is_empty() && !result.contains(&name) {
                        result.push(name);
                    }
                }
                result
            }
            None => machines(breakdowns),
        }
    }
}
