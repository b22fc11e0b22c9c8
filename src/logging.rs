//! Console logging for the device
//!
//! Records go to the ESP serial console through `esp-println`'s logger.

use log::LevelFilter;

/// Install the console logger, showing records up to `level`
///
/// Call once at boot, before the first log line.
pub fn init(level: LevelFilter) {
    esp_println::logger::init_logger(level);
    log::info!("logging at {}", level);
}
