//! Logging initialization

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG, e.g. `RUST_LOG=slicelight=trace` to see per-frame output.
///
/// # Example
/// ```
/// slicelight::core::logging::init();
/// log::info!("Renderer started");
/// ```
pub fn init() {
    // A host application may already own the logger.
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).try_init();
}

/// Route log output through the test harness capture.
#[cfg(test)]
pub(crate) fn init_for_tests() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("debug")
    )
    .is_test(true)
    .try_init();
}
