//! Spare-parts inventory API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{CreateSparePart, SparePart, UpdateSparePart},
};

/// List all spare parts, newest first
#[utoipa::path(
    get,
    path = "/spare-parts",
    tag = "spare-parts",
    responses(
        (status = 200, description = "Spare part list", body = Vec<SparePart>)
    )
)]
pub async fn list_spare_parts(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<SparePart>>> {
    let parts = state.services.spare_parts.list().await?;
    Ok(Json(parts))
}

/// Get a spare part by ID
#[utoipa::path(
    get,
    path = "/spare-parts/{id}",
    tag = "spare-parts",
    params(("id" = Uuid, Path, description = "Spare part ID")),
    responses(
        (status = 200, description = "Spare part details", body = SparePart),
        (status = 404, description = "Spare part not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_spare_part(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SparePart>> {
    let part = state.services.spare_parts.get_by_id(id).await?;
    Ok(Json(part))
}

/// Create a spare part
#[utoipa::path(
    post,
    path = "/spare-parts",
    tag = "spare-parts",
    request_body = CreateSparePart,
    responses(
        (status = 201, description = "Spare part created", body = SparePart),
        (status = 400, description = "Validation errors", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_spare_part(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateSparePart>,
) -> AppResult<(StatusCode, Json<SparePart>)> {
    let part = state.services.spare_parts.create(&data).await?;
    Ok((StatusCode::CREATED, Json(part)))
}

/// Update a spare part (partial; only supplied fields are applied)
#[utoipa::path(
    put,
    path = "/spare-parts/{id}",
    tag = "spare-parts",
    params(("id" = Uuid, Path, description = "Spare part ID")),
    request_body = UpdateSparePart,
    responses(
        (status = 200, description = "Spare part updated", body = SparePart),
        (status = 404, description = "Spare part not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_spare_part(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateSparePart>,
) -> AppResult<Json<SparePart>> {
    let part = state.services.spare_parts.update(id, &data).await?;
    Ok(Json(part))
}

/// Delete a spare part. Breakdown records referencing it keep their
/// denormalized consumption snapshots.
#[utoipa::path(
    delete,
    path = "/spare-parts/{id}",
    tag = "spare-parts",
    params(("id" = Uuid, Path, description = "Spare part ID")),
    responses(
        (status = 204, description = "Spare part deleted"),
        (status = 404, description = "Spare part not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_spare_part(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.spare_parts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
