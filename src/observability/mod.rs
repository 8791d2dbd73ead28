//! Observability for lexdict
//!
//! Structured logging through `tracing`. Library code only emits events;
//! the binary installs the subscriber once at startup.
//!
//! # Levels
//!
//! - `error`: storage failures and timeouts (answered with 500)
//! - `info`: lifecycle (startup, bind, shutdown)
//! - `debug`: rejected requests, lookups and the effective substring query

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "lexdict=info,tower_http=info";

/// Filter used when `RUST_LOG` is not set and verbose output is requested
pub const VERBOSE_FILTER: &str = "lexdict=debug,tower_http=debug";

/// Build the log filter. `RUST_LOG` wins over the defaults.
pub fn env_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the global fmt subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_target(false)
        .compact()
        .try_init();
}
