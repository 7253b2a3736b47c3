//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "FAULTLINE_LOG";

const DEFAULT_FILTER: &str = "faultline_core=info,faultline_analysis=info";

/// Initialize the Faultline tracing/logging system.
///
/// Reads `FAULTLINE_LOG` for per-subsystem log levels, e.g.
/// `FAULTLINE_LOG=faultline_analysis::ingest=debug,faultline_analysis::engine=info`.
///
/// Falls back to info level for the Faultline crates if `FAULTLINE_LOG` is
/// not set or is invalid.
/// Calling it more than once is a no-op. A subscriber installed elsewhere
/// first is left in place.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init();
    });
}
