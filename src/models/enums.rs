//! Fixed enumerations

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Breakdown incident category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BreakdownCategory {
    Electrical,
    Mechanical,
    Instrumentation,
    Other,
}

impl BreakdownCategory {
    pub const ALL: [BreakdownCategory; 4] = [
        BreakdownCategory::Electrical,
        BreakdownCategory::Mechanical,
        BreakdownCategory::Instrumentation,
        BreakdownCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BreakdownCategory::Electrical => "Electrical",
            BreakdownCategory::Mechanical => "Mechanical",
            BreakdownCategory::Instrumentation => "Instrumentation",
            BreakdownCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for BreakdownCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BreakdownCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Electrical" => Ok(BreakdownCategory::Electrical),
            "Mechanical" => Ok(BreakdownCategory::Mechanical),
            "Instrumentation" => Ok(BreakdownCategory::Instrumentation),
            "Other" => Ok(BreakdownCategory::Other),
            other => Err(format!("unknown breakdown category: {}", other)),
        }
    }
}
