//! Tracing setup for the binary.
//!
//! Events go to stderr so JSON written to stdout stays machine-readable. The filter is
//! read from `SQUAD_RATING_LOG` using `tracing_subscriber::EnvFilter` syntax.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "SQUAD_RATING_LOG";
const DEFAULT_DIRECTIVE: &str = "squad_rating=info";

static INIT: OnceLock<()> = OnceLock::new();

/// Installs the global subscriber. Later calls do nothing.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        // Another subscriber may already be installed by an embedding application.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
