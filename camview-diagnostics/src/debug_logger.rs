//! Logging initialisation

use camview_core::{BindError, BindResult, BinderConfig};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub fn log_filter(config: &BinderConfig) -> &'static str {
    if config.debug_logging {
        "camview_core=debug,camview_diagnostics=debug,info"
    } else {
        "info"
    }
}

/// Directives to install: `rust_log` when it is set and parses, else
/// [`log_filter`]
pub fn filter_directives(config: &BinderConfig, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim) {
        Some(directives) if !directives.is_empty() && EnvFilter::try_new(directives).is_ok() => {
            directives.to_string()
        }
        _ => log_filter(config).to_string(),
    }
}

/// Install a global fmt subscriber
///
/// `RUST_LOG` takes precedence over `config.debug_logging`. Fails if a global
/// subscriber is already installed.
pub fn init_logging(config: &BinderConfig) -> BindResult<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = filter_directives(config, rust_log.as_deref());
    let filter = EnvFilter::try_new(&directives).map_err(|e| BindError::InvalidConfiguration {
        message: format!("Invalid log filter {}: {}", directives, e),
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| BindError::InvalidConfiguration {
            message: format!("Failed to install log subscriber: {}", e),
        })
}
