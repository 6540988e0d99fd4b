//! Maintrack Maintenance Tracking System
//!
//! A Rust server for tracking equipment breakdown incidents and spare-parts
//! inventory, providing a REST JSON API plus derived reliability KPIs
//! (MTTR, MTBF, Pareto loss analysis).

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod inventory;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
