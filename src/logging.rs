//! Diagnostic logging to stderr.
//!
//! Filter directives come from `I18N_PAGE_LOG` (same syntax as `RUST_LOG`).
//! Without it only warnings are shown, or debug output for this crate when
//! `-v` is given.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "I18N_PAGE_LOG";

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "warn,i18n_page=debug" } else { "warn" }
}

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
