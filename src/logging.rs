//! Log output for the command-line tool and the test suites.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Filter used when `RUST_LOG` is unset. Dependencies stay at `warn`.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "warn,doc_search_index=debug"
    } else {
        "warn,doc_search_index=info"
    }
}

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

/// Sends logs to stderr, keeping stdout for command output.
///
/// `RUST_LOG` replaces the default filter entirely. Only the first call in a
/// process has any effect.
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        let result = tracing_subscriber::fmt()
            .with_env_filter(filter(verbose))
            .with_writer(std::io::stderr)
            .with_target(verbose)
            .without_time()
            .compact()
            .try_init();
        if let Err(e) = result {
            eprintln!("Failed to initialize logging: {}", e);
        }
    });
}

/// Debug logging captured by the test harness.
pub fn init_for_tests() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter(true))
            .with_test_writer()
            .with_ansi(false)
            .compact()
            .try_init();
    });
}
