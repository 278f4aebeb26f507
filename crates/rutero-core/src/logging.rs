//! Logging initialization
//!
//! Single initialization point for the tracing subscriber, called once by
//! the host surface at startup.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
}

static INIT_ONCE: Once = Once::new();

const DEV_FILTER: &str =
    "rutero_core=debug,rutero_store=debug,rutero_gateway=debug,rutero_cli=debug";
const PROD_FILTER: &str = "rutero_core=info,rutero_store=info,rutero_gateway=info,rutero_cli=info";

/// Initialize the logging facility
///
/// - **Development**: human-readable logs, debug level for rutero crates
/// - **Production**: JSON structured logs, info level
///
/// Logs go to stderr; stdout is reserved for command output. `RUST_LOG`
/// overrides the default filter in either profile. Repeat calls are no-ops.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(DEV_FILTER)),
                )
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(PROD_FILTER)),
                )
                .init();
        }
    });
}
