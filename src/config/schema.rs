//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML route files.

use serde::{Deserialize, Serialize};

use crate::http::handler::Capability;
use crate::routing::Method;

/// Root configuration for the route-table server.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address, body limit).
    pub listener: ListenerConfig,

    /// Routing tree settings.
    pub router: RouterConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route definitions.
    pub routes: Vec<RouteConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Largest request body read for routes that want the body.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Routing tree settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RouterConfig {
    /// Parse `:name` / `*name` markers. When false every pattern is literal.
    pub parameters: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self { parameters: true }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human format.
    pub json: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// A single route: which requests it takes and what its handler wants.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RouteConfig {
    /// Route identifier for logging and responses.
    pub name: String,

    /// HTTP method (default: GET).
    #[serde(default = "default_method")]
    pub method: Method,

    /// Path pattern, e.g. `/user/:id` or `/files/*path`.
    pub pattern: String,

    /// Request pieces handed to the handler.
    #[serde(default)]
    pub wants: Vec<Capability>,

    /// Response status code (default: 200).
    #[serde(default = "default_status")]
    pub status: u16,

    /// Fixed response body. Without one the handler echoes its input as JSON.
    #[serde(default)]
    pub body: Option<String>,
}

fn default_method() -> Method {
    Method::Get
}

fn default_status() -> u16 {
    200
}
