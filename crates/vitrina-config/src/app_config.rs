//! Application configuration structures.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Response cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Catalog source configuration.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "vitrina".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Enable CORS.
    pub cors_enabled: bool,
    /// CORS allowed origins.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_enabled: true,
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl ServerConfig {
    /// Returns the server address.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Response cache configuration.
///
/// Without a usable `redis_url` the cache runs on the in-process store only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Redis connection URL (`redis://` or `rediss://`).
    pub redis_url: Option<String>,
    /// Redis connection pool size.
    pub pool_size: usize,
    /// Upper bound for a single Redis call before falling back, in milliseconds.
    pub remote_timeout_ms: u64,
    /// Interval between expiry sweeps of the in-process store, in seconds.
    pub sweep_interval_secs: u64,
    /// Serialized results above this size are served but not stored.
    pub max_entry_bytes: usize,
    /// TTL for catalog list responses, in seconds.
    pub catalog_ttl_secs: u64,
    /// TTL for single product responses, in seconds.
    pub product_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            pool_size: 8,
            remote_timeout_ms: 150,
            sweep_interval_secs: 60,
            max_entry_bytes: 1024 * 1024, // 1MB
            catalog_ttl_secs: 300,        // 5 minutes
            product_ttl_secs: 600,        // 10 minutes
        }
    }
}

impl CacheConfig {
    /// Returns the Redis URL if it is present and well-formed.
    #[must_use]
    pub fn redis_url(&self) -> Option<&str> {
        let raw = self.redis_url.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "redis" | "rediss") && url.has_host() => Some(raw),
            _ => None,
        }
    }

    /// Whether a Redis URL was supplied but cannot be used.
    #[must_use]
    pub fn redis_url_is_invalid(&self) -> bool {
        self.redis_url
            .as_deref()
            .is_some_and(|raw| !raw.trim().is_empty())
            && self.redis_url().is_none()
    }

    /// Returns the Redis call timeout as a Duration.
    #[must_use]
    pub const fn remote_timeout(&self) -> Duration {
        Duration::from_millis(self.remote_timeout_ms)
    }

    /// Returns the sweep interval as a Duration.
    #[must_use]
    pub const fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Returns the catalog list TTL as a Duration.
    #[must_use]
    pub const fn catalog_ttl(&self) -> Duration {
        Duration::from_secs(self.catalog_ttl_secs)
    }

    /// Returns the product TTL as a Duration.
    #[must_use]
    pub const fn product_ttl(&self) -> Duration {
        Duration::from_secs(self.product_ttl_secs)
    }
}

/// Catalog source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the JSON export of the upstream catalog.
    pub source_path: String,
    /// Page size used when a request does not specify one.
    pub default_page_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source_path: "./data/catalog.json".to_string(),
            default_page_size: 24,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log format (json, pretty).
    pub log_format: String,
    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,
    /// Metrics endpoint path.
    pub metrics_path: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: true,
            metrics_path: "/metrics".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// Whether logs should be emitted as JSON lines.
    #[must_use]
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
