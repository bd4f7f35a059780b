//! Serve CLI command (HTTP API).

use crate::config::MoviegraphConfig;
use crate::storage::GraphExecutor;
use crate::Result;
use std::sync::Arc;

/// Serve command handler.
#[derive(Debug, Clone)]
pub struct ServeCommand {
    config: MoviegraphConfig,
}

impl ServeCommand {
    /// Creates a serve command, overriding the configured port if given.
    #[must_use]
    pub fn new(config: MoviegraphConfig, port: Option<u16>) -> Self {
        let config = match port {
            Some(port) => config.with_port(port),
            None => config,
        };
        Self { config }
    }

    /// Returns the effective configuration.
    #[must_use]
    pub const fn config(&self) -> &MoviegraphConfig {
        &self.config
    }

    /// Serves the API until ctrl-c.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails, or
    /// [`crate::Error::FeatureNotEnabled`] without the `http` feature.
    #[cfg(feature = "http")]
    pub async fn execute<E: GraphExecutor + 'static>(&self, executor: Arc<E>) -> Result<()> {
        crate::http::serve(executor, &self.config).await
    }

    /// Serves the API (feature not enabled).
    ///
    /// # Errors
    ///
    /// Always returns [`crate::Error::FeatureNotEnabled`].
    #[cfg(not(feature = "http"))]
    pub async fn execute<E: GraphExecutor + 'static>(&self, _executor: Arc<E>) -> Result<()> {
        Err(crate::Error::FeatureNotEnabled("http".to_string()))
    }
}
