//! Logger initialisation for the demo binary and tests.
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV: &str = "FLOATBAR_LOG";

/// Installs `env_logger` as the global logger.
///
/// `FLOATBAR_LOG` takes precedence over `RUST_LOG`. When neither is set,
/// `verbose` selects debug output for this crate, otherwise info and above.
/// Returns `false` when another logger was already installed.
#[must_use]
pub fn init(verbose: bool) -> bool {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let crate_filter = format!("{}={level}", env!("CARGO_CRATE_NAME"));
    let default_filter = std::env::var("RUST_LOG").unwrap_or(crate_filter);

    Builder::from_env(Env::default().filter_or(LOG_ENV, default_filter))
        .format_timestamp_millis()
        .try_init()
        .is_ok()
}
