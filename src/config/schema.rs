//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the permalink gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, limits).
    pub listener: ListenerConfig,

    /// CMS collaborator settings.
    pub cms: CmsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Structure cache persistence.
    pub cache: CacheConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// CMS collaborator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Base URL of the CMS REST API, no trailing slash required
    /// (e.g., "https://example.com/wp-json").
    pub api_base: String,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:3000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout on the HTTP surface, in seconds.
    pub request_secs: u64,

    /// Per-lookup timeout against the CMS, in seconds.
    pub lookup_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            lookup_secs: 10,
        }
    }
}

/// Structure cache persistence configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory for the persisted permalink-structure copy.
    /// None disables persistence.
    pub dir: Option<String>,
}
