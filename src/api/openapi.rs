//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{breakdowns, dashboard, health, kpi, spare_parts};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Maintrack API",
        description = "Equipment Breakdown and Spare-Parts Tracking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Spare parts
        spare_parts::list_spare_parts,
        spare_parts::get_spare_part,
        spare_parts::create_spare_part,
        spare_parts::update_spare_part,
        spare_parts::delete_spare_part,
        // Breakdowns
        breakdowns::list_breakdowns,
        breakdowns::get_breakdown,
        breakdowns::create_breakdown,
        breakdowns::delete_breakdown,
        // KPIs
        kpi::list_machines,
        kpi::get_mttr,
        kpi::get_mtbf,
        kpi::get_pareto,
        // Dashboard
        dashboard::get_overview,
    ),
    components(
        schemas(
            // Spare parts
            crate::models::SparePart,
            crate::models::CreateSparePart,
            crate::models::UpdateSparePart,
            // Breakdowns
            crate::models::Breakdown,
            crate::models::BreakdownCategory,
            crate::models::SpareConsumption,
            crate::models::ConsumptionRequest,
            crate::models::CreateBreakdown,
            breakdowns::DeleteBreakdownResponse,
            // KPIs
            crate::services::kpi::MttrEntry,
            crate::services::kpi::MtbfEntry,
            crate::services::kpi::ParetoEntry,
            crate::services::kpi::DashboardSummary,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "spare-parts", description = "Spare-parts inventory management"),
        (name = "breakdowns", description = "Breakdown incident lifecycle"),
        (name = "kpi", description = "Reliability KPIs (MTTR, MTBF, Pareto)"),
        (name = "dashboard", description = "Dashboard summary")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
