//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logger setup
//! - Storage (LocalStorage on web, files on native)

pub mod storage;

/// Install the platform log sink. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Logger already initialised");
    }
}

/// Install the platform log sink. Safe to call more than once.
///
/// Honours `RUST_LOG`, defaulting to `info`.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialised");
    }
}
