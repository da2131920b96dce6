use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ChatModel;
use crate::simulation::job::JobTracker;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single progress record and the handle of the in-flight run.
    pub jobs: JobTracker,
    /// Chat model used by the crew and the connection probe. Tests swap in a scripted model.
    pub llm: Arc<dyn ChatModel>,
    pub config: Config,
}
