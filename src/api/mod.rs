//! API handlers for the Maintrack REST endpoints

pub mod breakdowns;
pub mod dashboard;
pub mod health;
pub mod kpi;
pub mod openapi;
pub mod spare_parts;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Spare parts inventory
        .route("/spare-parts", get(spare_parts::list_spare_parts))
        .route("/spare-parts", post(spare_parts::create_spare_part))
        .route("/spare-parts/:id", get(spare_parts::get_spare_part))
        .route("/spare-parts/:id", put(spare_parts::update_spare_part))
        .route("/spare-parts/:id", delete(spare_parts::delete_spare_part))
        // Breakdowns
        .route("/breakdowns", get(breakdowns::list_breakdowns))
        .route("/breakdowns", post(breakdowns::create_breakdown))
        .route("/breakdowns/:id", get(breakdowns::get_breakdown))
        .route("/breakdowns/:id", delete(breakdowns::delete_breakdown))
        // KPIs
        .route("/kpi/machines", get(kpi::list_machines))
        .route("/kpi/mttr", get(kpi::get_mttr))
        .route("/kpi/mtbf", get(kpi::get_mtbf))
        .route("/kpi/pareto", get(kpi::get_pareto))
        // Dashboard
        .route("/dashboard", get(dashboard::get_overview))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
