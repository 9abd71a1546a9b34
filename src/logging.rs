//! Tracing setup for the native binaries

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Filter used when `RUST_LOG` is unset
pub fn default_directives(config: &LoggingConfig, extra: &str) -> String {
    let mut directives = format!("fitwell={}", config.level);
    if !extra.is_empty() {
        directives.push(',');
        directives.push_str(extra);
    }
    directives
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level. `extra` adds directives for
/// other crates, e.g. `tower_http=debug` for the web host.
pub fn init(config: &LoggingConfig, extra: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directives(config, extra).into());

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        let config = LoggingConfig {
            level: "debug".into(),
            format: "json".into(),
        };

        assert_eq!(default_directives(&config, ""), "fitwell=debug");
        assert_eq!(
            default_directives(&config, "tower_http=debug"),
            "fitwell=debug,tower_http=debug"
        );
    }
}
