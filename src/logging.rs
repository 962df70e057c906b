pub use log::LevelFilter::*;

/// Installs the global logger. Later calls are ignored by `log`, which only
/// accepts one logger per process.
pub fn setup_logging(verbosity: log::LevelFilter) {
    let result = fern::Dispatch::new()
        .level(verbosity)
        .format(|out, message, record| out.finish(format_args!("{} {}: {}", record.level(), record.target(), message)))
        .chain(std::io::stdout())
        .apply();

    if result.is_ok() {
        log::trace!("Logging initialized at {}", verbosity);
    }
}
