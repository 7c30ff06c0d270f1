//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the sync daemon.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::caddy::base::DEFAULT_LISTEN_PORT;
use crate::caddy::client::DEFAULT_ADMIN_URL;
use crate::route::model::{Route, ANY_PATH};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SyncConfig {
    /// Caddy admin endpoint.
    pub admin: AdminConfig,

    /// HTTP server block the routes live in.
    pub server: ServerConfig,

    /// Periodic refresh settings.
    pub refresh: RefreshConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Routes to keep in sync.
    pub routes: Vec<RouteSpec>,
}

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Admin base URL (e.g., "http://localhost:2019").
    pub url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Admin URL a fresh server listens on before the base configuration
    /// moves it to `url`. Defaults to `url`.
    pub bootstrap_url: Option<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ADMIN_URL.to_string(),
            timeout_secs: 10,
            bootstrap_url: None,
        }
    }
}

/// HTTP server block configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Key under `apps.http.servers`.
    pub key: String,

    /// Port the server listens on in the base configuration.
    pub listen_port: u16,

    /// Load the base configuration before the first sync.
    /// This replaces whatever the server currently runs.
    pub seed_base_config: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            key: "myserver".to_string(),
            listen_port: DEFAULT_LISTEN_PORT,
            seed_base_config: false,
        }
    }
}

/// Periodic refresh configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Keep reconciling on an interval after the first pass.
    pub enabled: bool,

    /// Seconds between passes.
    pub interval_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// One reverse-proxy route, addressed by `id`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteSpec {
    /// Value stamped into `@id`; usually the primary host.
    pub id: String,

    /// Host names to match.
    pub hosts: Vec<String>,

    /// Path patterns to match.
    #[serde(default = "default_paths")]
    pub paths: Vec<String>,

    /// Upstream dial addresses (`host:port`).
    pub upstreams: Vec<String>,
}

fn default_paths() -> Vec<String> {
    vec![ANY_PATH.to_string()]
}

impl RouteSpec {
    /// Wire route for this entry.
    pub fn to_route(&self) -> Route {
        Route::reverse_proxy_paths(
            self.hosts.iter().cloned(),
            self.paths.iter().cloned(),
            self.upstreams.iter().cloned(),
        )
    }
}
