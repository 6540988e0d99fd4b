//! Domain models and request/response types

pub mod breakdown;
pub mod enums;
pub mod spare_part;

pub use breakdown::{Breakdown, ConsumptionRequest, CreateBreakdown, NewBreakdown, SpareConsumption};
pub use enums::BreakdownCategory;
pub use spare_part::{CreateSparePart, SparePart, UpdateSparePart};
