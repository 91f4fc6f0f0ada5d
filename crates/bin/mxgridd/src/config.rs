//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `mxgrid.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use mxgrid_app::resize::DEFAULT_RESIZE_DEBOUNCE;
use mxgrid_app::services::dashboard_service::DEFAULT_JOBS_PER_PROCESS;
use mxgrid_domain::error::MxError;
use mxgrid_domain::grid::Viewport;
use mxgrid_domain::id::TILE_ID_POOL_SIZE;
use mxgrid_domain::record::{Hierarchy, Tree};
use mxgrid_domain::template::tile_count;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Page geometry.
    pub layout: LayoutConfig,
    /// Dashboard content and redraw behaviour.
    pub dashboard: DashboardConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Initial window and cell geometry.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Pixels between cells and around the grid edges.
    pub cell_padding: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Quiet period before a resize triggers a redraw.
    pub resize_debounce_ms: u64,
    /// Job tiles built per process. Signed so a negative value is reported
    /// instead of failing to parse.
    pub jobs_per_process: i64,
    /// Trees to display instead of the data source's own hierarchy.
    pub trees: Vec<Tree>,
}

impl Config {
    /// Load configuration from `mxgrid.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if a
    /// value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("mxgrid.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("MXGRID_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("MXGRID_PORT")
            && let Ok(port) = val.parse()
        {
            self.server.port = port;
        }
        if let Ok(val) = std::env::var("MXGRID_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("MXGRID_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("MXGRID_RESIZE_DEBOUNCE_MS")
            && let Ok(ms) = val.parse()
        {
            self.dashboard.resize_debounce_ms = ms;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        self.window().validate()?;
        let jobs = self.jobs_per_process()?;
        if jobs > TILE_ID_POOL_SIZE {
            return Err(ConfigError::Validation(format!(
                "jobs_per_process must be at most {TILE_ID_POOL_SIZE}, got {jobs}"
            )));
        }
        Hierarchy::new(self.dashboard.trees.clone()).validate()?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the window size grids are first laid out for.
    #[must_use]
    pub fn window(&self) -> Viewport {
        Viewport::new(self.layout.viewport_width, self.layout.viewport_height)
    }

    #[must_use]
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.dashboard.resize_debounce_ms)
    }

    /// Return the number of job tiles per process.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Dashboard`] when the configured value is negative.
    pub fn jobs_per_process(&self) -> Result<usize, ConfigError> {
        Ok(tile_count(self.dashboard.jobs_per_process)?)
    }

    /// Return the configured hierarchy, if any trees were configured.
    #[must_use]
    pub fn hierarchy(&self) -> Option<Hierarchy> {
        (!self.dashboard.trees.is_empty()).then(|| Hierarchy::new(self.dashboard.trees.clone()))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "mxgridd=info,mxgrid_app=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280,
            viewport_height: 800,
            cell_padding: 10,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            resize_debounce_ms: u64::try_from(DEFAULT_RESIZE_DEBOUNCE.as_millis()).unwrap_or(200),
            jobs_per_process: i64::try_from(DEFAULT_JOBS_PER_PROCESS).unwrap_or(10),
            trees: Vec::new(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
    /// Dashboard values rejected by the domain.
    #[error("invalid dashboard configuration")]
    Dashboard(#[from] MxError),
}
