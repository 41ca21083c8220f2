//! Logging setup for the command-line front end.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const APP_TARGET: &str = "naverfx";

/// Directives used when `RUST_LOG` is unset. Quiet unless `verbose`, which
/// turns on debug output for this crate and keeps dependencies at warn.
fn default_directives(verbose: bool) -> String {
    if verbose {
        format!("warn,{APP_TARGET}=debug")
    } else {
        "off".to_string()
    }
}

pub fn log_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

/// Installs the global subscriber, writing to stderr so stdout stays clean
/// for `--json` output. A second call leaves the first subscriber in place.
pub fn init_logging(verbose: bool) {
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_target(verbose)
                .with_writer(std::io::stderr),
        )
        .with(log_filter(verbose))
        .try_init();

    if let Err(e) = result {
        eprintln!("Logging already initialized: {e}");
    }
}
