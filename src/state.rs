//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::orchestrator::ParseOrchestrator;

/// Shared application state. Cheap to clone. Note what is NOT here: the
/// active parse session. A session lives as a local value inside one
/// request's handle call, so concurrent requests can never trample each
/// other's parser.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    orchestrator: ParseOrchestrator,
}

impl AppState {
    pub fn new(config: Config, orchestrator: ParseOrchestrator) -> Self {
        Self {
            config: Arc::new(config),
            orchestrator,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn orchestrator(&self) -> &ParseOrchestrator {
        &self.orchestrator
    }
}
