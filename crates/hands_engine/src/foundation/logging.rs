//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with a default level, still overridable
/// through `RUST_LOG`. Safe to call more than once (later calls are ignored).
pub fn init_with_level(level: log::LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

/// Send log output through the test harness so it only shows for failures
#[cfg(test)]
pub(crate) fn init_for_tests() {
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Debug)
        .parse_default_env()
        .is_test(true)
        .try_init();
}
