//! Business logic services

pub mod breakdowns;
pub mod kpi;
pub mod spare_parts;

use crate::{config::DashboardConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub spare_parts: spare_parts::SparePartsService,
    pub breakdowns: breakdowns::BreakdownsService,
    pub kpi: kpi::KpiService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, dashboard_config: DashboardConfig) -> Self {
        Self {
            spare_parts: spare_parts::SparePartsService::new(repository.clone()),
            breakdowns: breakdowns::BreakdownsService::new(repository.clone()),
            kpi: kpi::KpiService::new(repository, dashboard_config),
        }
    }
}
