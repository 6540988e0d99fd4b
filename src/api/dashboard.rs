//! Dashboard overview endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, services::kpi::DashboardSummary};

/// Summary figures for the dashboard
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummary)
    )
)]
pub async fn get_overview(
    State(state): State<crate::AppState>,
) -> AppResult<Json<DashboardSummary>> {
    let summary = state.services.kpi.overview().await?;
    Ok(Json(summary))
}
