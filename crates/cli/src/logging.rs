//! Logging configuration for the vaultlook CLI
//!
//! Terminal output via tracing, compact and without timestamps unless
//! verbose mode is on. `RUST_LOG` overrides the default filter.

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system
///
/// # Arguments
/// * `verbose` - Enable debug level logging
pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    // Allows overriding with RUST_LOG env var
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("vaultlook={level},vaultlook_vault={level},vaultlook_lookup={level}")))
        .expect("failed to create default env filter");

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_ansi(true)
        .with_writer(std::io::stderr);

    if verbose {
        tracing_subscriber::registry()
            .with(fmt_layer.with_filter(env_filter))
            .init();
    } else {
        // No timestamps in normal mode
        tracing_subscriber::registry()
            .with(fmt_layer.without_time().with_filter(env_filter))
            .init();
    }
}
