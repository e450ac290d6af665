//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::planner::Engine;

/// Shared application state.
///
/// Route queries take the read lock and run concurrently; disruption
/// changes take the write lock, so a query always sees a fully rebuilt
/// effective graph.
#[derive(Clone)]
pub struct AppState {
    /// Routing engine for the live disruption scenario
    pub engine: Arc<RwLock<Engine>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
        }
    }
}
