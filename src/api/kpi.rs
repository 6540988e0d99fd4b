//! KPI API endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    services::kpi::{MtbfEntry, MttrEntry, ParetoEntry},
};

/// Machine filter for KPI queries
#[derive(Debug, Deserialize, IntoParams)]
pub struct KpiQuery {
    /// Comma-separated machine names; all known machines when omitted
    pub machines: Option<String>,
}

impl KpiQuery {
    fn selection(self) -> Option<Vec<String>> {
        self.machines
            .map(|raw| raw.split(',').map(|m| m.to_string()).collect())
    }
}

/// List the selectable machine names
#[utoipa::path(
    get,
    path = "/kpi/machines",
    tag = "kpi",
    responses(
        (status = 200, description = "Distinct machine names", body = Vec<String>)
    )
)]
pub async fn list_machines(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<String>>> {
    let machines = state.services.kpi.machines().await?;
    Ok(Json(machines))
}

/// Mean time to repair per machine
#[utoipa::path(
    get,
    path = "/kpi/mttr",
    tag = "kpi",
    params(KpiQuery),
    responses(
        (status = 200, description = "MTTR per machine, lowest first", body = Vec<MttrEntry>)
    )
)]
pub async fn get_mttr(
    State(state): State<crate::AppState>,
    Query(query): Query<KpiQuery>,
) -> AppResult<Json<Vec<MttrEntry>>> {
    let entries = state.services.kpi.mttr(query.selection()).await?;
    Ok(Json(entries))
}

/// Mean time between failures per machine
#[utoipa::path(
    get,
    path = "/kpi/mtbf",
    tag = "kpi",
    params(KpiQuery),
    responses(
        (status = 200, description = "MTBF per machine, highest first", body = Vec<MtbfEntry>)
    )
)]
pub async fn get_mtbf(
    State(state): State<crate::AppState>,
    Query(query): Query<KpiQuery>,
) -> AppResult<Json<Vec<MtbfEntry>>> {
    let entries = state.services.kpi.mtbf(query.selection()).await?;
    Ok(Json(entries))
}

/// Loss-time Pareto analysis per machine
#[utoipa::path(
    get,
    path = "/kpi/pareto",
    tag = "kpi",
    params(KpiQuery),
    responses(
        (status = 200, description = "Loss time per machine, largest first", body = Vec<ParetoEntry>)
    )
)]
pub async fn get_pareto(
    State(state): State<crate::AppState>,
    Query(query): Query<KpiQuery>,
) -> AppResult<Json<Vec<ParetoEntry>>> {
    let entries = state.services.kpi.pareto(query.selection()).await?;
    Ok(Json(entries))
}
