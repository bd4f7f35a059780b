//! Config CLI command.

use crate::config::MoviegraphConfig;
use crate::{Error, Result};

/// Config command handler.
pub struct ConfigCommand;

impl ConfigCommand {
    /// Creates a new config command.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders the effective configuration as TOML, secrets redacted.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized.
    pub fn render(&self, config: &MoviegraphConfig) -> Result<String> {
        toml::to_string_pretty(config).map_err(|e| Error::operation("render_config", e))
    }
}

impl Default for ConfigCommand {
    fn default() -> Self {
        Self::new()
    }
}
