//! Colored log output for tests and examples.

use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

/// Route `log` output to stdout with per-level colors. Safe to call from
/// every test; only the first call wins.
pub fn init_test_logging(level: LevelFilter) {
    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .debug(Color::BrightBlack)
        .warn(Color::Yellow)
        .error(Color::Red);

    let result = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .apply();

    // Another test already installed a logger; that one is fine too
    let _ = result;
}
