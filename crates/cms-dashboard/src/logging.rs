//! Logging initialization for `cmsd`.
//!
//! Filter directives come from the `CMSD_LOG` environment variable, falling
//! back to the configured `[log] level`. Records emitted by the library
//! crates through the `log` facade are forwarded into the subscriber.
//!
//! ```bash
//! CMSD_LOG=debug cmsd widgets list
//! CMSD_LOG=kv_store=trace,warn cmsd import backup.json
//! ```

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "CMSD_LOG";

/// `CMSD_LOG` if set and valid, else `fallback`.
pub fn filter(fallback: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback.as_str()))
}

/// Install the global subscriber, writing to stderr.
///
/// A second call is a no-op.
pub fn init(fallback: LogLevel) {
    let _ = fmt()
        .with_env_filter(filter(fallback))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::xdg::tests::with_env;
    use serial_test::serial;

    #[test]
    fn env_filter_parses_module_directive() {
        assert!(EnvFilter::try_new("kv_store=debug,warn").is_ok());
    }

    #[test]
    #[serial(env)]
    fn falls_back_to_configured_level() {
        with_env(&[(LOG_ENV, None)], || {
            assert_eq!(filter(LogLevel::Debug).to_string(), "debug");
        });
    }

    #[test]
    #[serial(env)]
    fn env_overrides_configured_level() {
        with_env(&[(LOG_ENV, Some("trace"))], || {
            assert_eq!(filter(LogLevel::Error).to_string(), "trace");
        });
    }
}
