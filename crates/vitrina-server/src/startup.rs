//! Server startup utilities.

use tracing::info;
use vitrina_config::AppConfig;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
 _    ___ __       _
| |  / (_) /______(_)___  ____ _
| | / / / __/ ___/ / __ \/ __ `/
| |/ / / /_/ /  / / / / / /_/ /
|___/_/\__/_/  /_/_/ /_/\__,_/
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let addr = config.server.addr();
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("Catalog:   http://{}/api/v1/catalog", addr);
    info!("Health:    http://{}/health", addr);
    if config.observability.metrics_enabled {
        info!("Metrics:   http://{}{}", addr, config.observability.metrics_path);
    }
    info!(
        "Cache:     {}",
        if config.cache.redis_url().is_some() {
            "redis with in-process fallback"
        } else {
            "in-process only"
        }
    );
    info!("{}", separator);
}
