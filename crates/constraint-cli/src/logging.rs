//! Subscriber setup

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set. Otherwise the level is `warn`, raised to `debug`
/// by `--verbose` and to `trace` for the library by `--trace`.
pub fn init(verbose: bool, trace: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose, trace)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn default_directives(verbose: bool, trace: bool) -> String {
    let base = if verbose { "debug" } else { "warn" };
    if trace {
        format!("{},fabric_constraint=trace", base)
    } else {
        base.to_string()
    }
}
