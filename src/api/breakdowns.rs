//! Breakdown lifecycle API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Breakdown, CreateBreakdown},
};

/// Outcome of a breakdown deletion
#[derive(Serialize, ToSchema)]
pub struct DeleteBreakdownResponse {
    pub success: bool,
    pub message: String,
}

/// List all breakdowns, newest first
#[utoipa::path(
    get,
    path = "/breakdowns",
    tag = "breakdowns",
    responses(
        (status = 200, description = "Breakdown list", body = Vec<Breakdown>)
    )
)]
pub async fn list_breakdowns(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Breakdown>>> {
    let breakdowns = state.services.breakdowns.list().await?;
    Ok(Json(breakdowns))
}

/// Get a breakdown by ID
#[utoipa::path(
    get,
    path = "/breakdowns/{id}",
    tag = "breakdowns",
    params(("id" = Uuid, Path, description = "Breakdown ID")),
    responses(
        (status = 200, description = "Breakdown details", body = Breakdown),
        (status = 404, description = "Breakdown not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_breakdown(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Breakdown>> {
    let breakdown = state.services.breakdowns.get_by_id(id).await?;
    Ok(Json(breakdown))
}

/// Record a breakdown, consuming the listed spare parts from inventory
#[utoipa::path(
    post,
    path = "/breakdowns",
    tag = "breakdowns",
    request_body = CreateBreakdown,
    responses(
        (status = 201, description = "Breakdown created", body = Breakdown),
        (status = 400, description = "Validation errors", body = crate::error::ErrorResponse),
        (status = 422, description = "Insufficient stock or unknown spare part", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_breakdown(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateBreakdown>,
) -> AppResult<(StatusCode, Json<Breakdown>)> {
    let breakdown = state.services.breakdowns.create(&data).await?;
    Ok((StatusCode::CREATED, Json(breakdown)))
}

/// Delete a breakdown, returning its consumed spares to inventory
#[utoipa::path(
    delete,
    path = "/breakdowns/{id}",
    tag = "breakdowns",
    params(("id" = Uuid, Path, description = "Breakdown ID")),
    responses(
        (status = 200, description = "Breakdown deleted", body = DeleteBreakdownResponse),
        (status = 404, description = "Breakdown not found", body = DeleteBreakdownResponse)
    )
)]
pub async fn delete_breakdown(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<DeleteBreakdownResponse>)> {
    if state.services.breakdowns.delete(id).await? {
        Ok((
            StatusCode::OK,
            Json(DeleteBreakdownResponse {
                success: true,
                message: "Breakdown deleted successfully".to_string(),
            }),
        ))
    } else {
        Ok((
            StatusCode::NOT_FOUND,
            Json(DeleteBreakdownResponse {
                success: false,
                message: "Breakdown not found".to_string(),
            }),
        ))
    }
}
