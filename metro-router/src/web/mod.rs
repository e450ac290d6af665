//! Web layer for the metro router.
//!
//! Provides JSON endpoints for route planning, disruption management and
//! resilience analysis over one shared engine.

mod config;
mod dto;
mod routes;
mod state;

pub use config::{ConfigError, DEFAULT_ADDR, ServerConfig};
pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
