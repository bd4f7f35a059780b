//! Configuration management.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then `MOVIEGRAPH_*` environment variables (a `.env` file in the working
//! directory is loaded first).
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1"
//! port = 3000
//!
//! [neo4j]
//! uri = "bolt://localhost:7687"
//! user = "neo4j"
//! password = "secret"
//!
//! [presentation]
//! drop_placeholders = true
//! dedupe_graph_nodes = true
//!
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [metrics]
//! enabled = true
//! port = 9090
//! ```

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default path prefix for API routes.
pub const DEFAULT_API_PATH: &str = "/api/v0";

/// Main configuration for moviegraph.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MoviegraphConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database connection settings.
    pub neo4j: Neo4jConfig,
    /// Output shaping options.
    pub presentation: PresentationOptions,
    /// Logging settings.
    pub logging: LoggingSettings,
    /// Metrics settings.
    pub metrics: MetricsSettings,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    /// Address to bind.
    pub bind: String,
    /// Port to listen on.
    pub port: u16,
    /// Path prefix the API routes are mounted under.
    pub api_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            api_path: DEFAULT_API_PATH.to_string(),
        }
    }
}

/// Graph database connection settings.
#[derive(Debug, Clone, Serialize)]
pub struct Neo4jConfig {
    /// Bolt URI.
    pub uri: String,
    /// Username.
    pub user: String,
    /// Password.
    #[serde(serialize_with = "secret_string_serde::serialize")]
    pub password: SecretString,
    /// Database name; the server default when unset.
    pub database: Option<String>,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: SecretString::from("neo4j"),
            database: None,
        }
    }
}

/// Output shaping options.
///
/// Every option defaults to off, which reproduces the raw query output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationOptions {
    /// Drop all-null entries left by optional joins that matched nothing.
    #[serde(default)]
    pub drop_placeholders: bool,
    /// Emit each graph node and link once per render.
    #[serde(default)]
    pub dedupe_graph_nodes: bool,
    /// Seed for graph colors; random per render when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_seed: Option<u64>,
}

/// Logging settings as read from the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `moviegraph=debug`.
    pub level: Option<String>,
    /// `pretty` or `json`.
    pub format: Option<String>,
    /// Log file path; stderr when unset.
    pub file: Option<PathBuf>,
}

/// Metrics settings as read from the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsSettings {
    /// Whether metrics are recorded.
    pub enabled: Option<bool>,
    /// Prometheus exporter port.
    pub port: Option<u16>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Server section.
    pub server: Option<ConfigFileServer>,
    /// Database section.
    pub neo4j: Option<ConfigFileNeo4j>,
    /// Presentation section.
    pub presentation: Option<PresentationOptions>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
    /// Metrics section.
    pub metrics: Option<MetricsSettings>,
}

/// Server section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileServer {
    /// Bind address.
    pub bind: Option<String>,
    /// Port.
    pub port: Option<u16>,
    /// API path prefix.
    pub api_path: Option<String>,
}

/// Database section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileNeo4j {
    /// Bolt URI.
    pub uri: Option<String>,
    /// Username.
    pub user: Option<String>,
    /// Password.
    pub password: Option<String>,
    /// Database name.
    pub database: Option<String>,
}

impl MoviegraphConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;
        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid config file.
    pub fn from_toml(contents: &str) -> crate::Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;
        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks `moviegraph/config.toml` under the platform config dir, then
    /// under `~/.config`. Returns defaults if neither exists or parses.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let candidates = [
            base_dirs.config_dir().join("moviegraph").join("config.toml"),
            base_dirs
                .home_dir()
                .join(".config")
                .join("moviegraph")
                .join("config.toml"),
        ];
        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "Ignoring config file"),
            }
        }

        Self::default()
    }

    /// Loads the effective configuration: file (explicit or default), then environment.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file cannot be loaded.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        // Missing .env is fine
        let _ = dotenvy::dotenv();

        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load_default(),
        };
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Applies `MOVIEGRAPH_*` overrides read through `lookup`.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(bind) = lookup("MOVIEGRAPH_BIND") {
            self.server.bind = bind;
        }
        if let Some(port) = lookup("MOVIEGRAPH_PORT").and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }
        if let Some(api_path) = lookup("MOVIEGRAPH_API_PATH") {
            self.server.api_path = api_path;
        }
        if let Some(uri) = lookup("MOVIEGRAPH_NEO4J_URI") {
            self.neo4j.uri = uri;
        }
        if let Some(user) = lookup("MOVIEGRAPH_NEO4J_USER") {
            self.neo4j.user = user;
        }
        if let Some(password) = lookup("MOVIEGRAPH_NEO4J_PASSWORD") {
            self.neo4j.password = SecretString::from(password);
        }
        if let Some(database) = lookup("MOVIEGRAPH_NEO4J_DATABASE") {
            self.neo4j.database = Some(database);
        }
        if let Some(v) = lookup("MOVIEGRAPH_DROP_PLACEHOLDERS").and_then(|v| parse_bool(&v)) {
            self.presentation.drop_placeholders = v;
        }
        if let Some(v) = lookup("MOVIEGRAPH_DEDUPE_GRAPH_NODES").and_then(|v| parse_bool(&v)) {
            self.presentation.dedupe_graph_nodes = v;
        }
        if let Some(seed) = lookup("MOVIEGRAPH_COLOR_SEED").and_then(|v| v.parse().ok()) {
            self.presentation.color_seed = Some(seed);
        }
        if let Some(v) = lookup("MOVIEGRAPH_METRICS_ENABLED").and_then(|v| parse_bool(&v)) {
            self.metrics.enabled = Some(v);
        }
        if let Some(port) = lookup("MOVIEGRAPH_METRICS_PORT").and_then(|v| v.parse().ok()) {
            self.metrics.port = Some(port);
        }
        self
    }

    /// Converts a `ConfigFile` to `MoviegraphConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(server) = file.server {
            if let Some(bind) = server.bind {
                config.server.bind = bind;
            }
            if let Some(port) = server.port {
                config.server.port = port;
            }
            if let Some(api_path) = server.api_path {
                config.server.api_path = api_path;
            }
        }
        if let Some(neo4j) = file.neo4j {
            if let Some(uri) = neo4j.uri {
                config.neo4j.uri = uri;
            }
            if let Some(user) = neo4j.user {
                config.neo4j.user = user;
            }
            if let Some(password) = neo4j.password {
                config.neo4j.password = SecretString::from(password);
            }
            config.neo4j.database = neo4j.database;
        }
        if let Some(presentation) = file.presentation {
            config.presentation = presentation;
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }
        if let Some(metrics) = file.metrics {
            config.metrics = metrics;
        }

        config
    }

    /// Sets the HTTP port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.server.port = port;
        self
    }
}

/// Parses common boolean spellings.
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Serde helpers for `SecretString`.
mod secret_string_serde {
    use secrecy::SecretString;
    use serde::Serializer;

    pub fn serialize<S>(_secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str("***REDACTED***")
    }
}
