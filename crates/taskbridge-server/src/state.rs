//! Shared application state.

use std::sync::Arc;

use tokio_util::task::TaskTracker;
use tracing::info;

use taskbridge_llm::{HttpModelClient, HttpModelConfig, ModelError, TaskStructurer};

use crate::config::Config;
use crate::downstream::DownstreamClient;
use crate::metrics::Counters;
use crate::runs::RunController;

/// Shared application state.
pub struct AppState {
    /// Configuration the server was started with.
    pub config: Config,

    /// Task structurer; disabled when no model credential is configured.
    pub structurer: TaskStructurer,

    /// Client for the downstream executor.
    pub downstream: DownstreamClient,

    /// Run lifecycle and registry.
    pub runs: RunController,

    /// Detached forwards still in flight.
    pub forwards: TaskTracker,

    /// Ingestion and forward counters.
    pub counters: Counters,
}

impl AppState {
    /// Build the state from configuration.
    pub fn from_config(config: Config) -> Result<Arc<Self>, ModelError> {
        let structurer = if config.structuring_enabled() {
            let key = config.model_api_key.clone().unwrap_or_default();
            let model_config = HttpModelConfig::new(key)
                .with_base_url(config.model_base_url.clone())
                .with_model(config.model.clone());
            info!(model = %config.model, "Task structuring enabled");
            TaskStructurer::new(Arc::new(HttpModelClient::new(model_config)?))
        } else {
            info!("No model credential configured, task structuring disabled");
            TaskStructurer::disabled()
        };

        let downstream = DownstreamClient::new(&config.downstream_url);
        Ok(Self::with_parts(config, structurer, downstream))
    }

    /// Build the state from already constructed parts.
    pub fn with_parts(
        config: Config,
        structurer: TaskStructurer,
        downstream: DownstreamClient,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            structurer,
            downstream,
            runs: RunController::default(),
            forwards: TaskTracker::new(),
            counters: Counters::default(),
        })
    }
}
