//! Logging setup
//!
//! All diagnostics go through the `log` facade. The backend writes to stdout
//! so that the handheld debug redirect picks it up along with everything else.

use std::str::FromStr;

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging backend
///
/// `level` is a `log` level name ("info", "debug", ...). Unknown names fall
/// back to `info`. When `RUST_LOG` is set it decides the filters instead.
/// Calling this more than once only changes the level.
pub fn init(level: &str) {
    let result = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Trace)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .try_init();

    if result.is_err() {
        log::debug!("Logger already initialized");
    }
    set_level(level);
}

/// Change the global level of an initialized logger
///
/// No-op when `RUST_LOG` is set.
pub fn set_level(level: &str) {
    if rust_log_set() {
        return;
    }
    log::set_max_level(parse_level(level));
}

fn rust_log_set() -> bool {
    std::env::var_os("RUST_LOG").is_some()
}

/// Parse a level name, defaulting to `Info`
pub fn parse_level(level: &str) -> log::LevelFilter {
    log::LevelFilter::from_str(level).unwrap_or(log::LevelFilter::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), log::LevelFilter::Debug);
        assert_eq!(parse_level("WARN"), log::LevelFilter::Warn);
        assert_eq!(parse_level("loud"), log::LevelFilter::Info);
    }

    #[test]
    fn test_init_then_set_level() {
        init("info");
        init("debug");
        if rust_log_set() {
            return;
        }
        assert_eq!(log::max_level(), log::LevelFilter::Debug);

        set_level("warn");
        assert_eq!(log::max_level(), log::LevelFilter::Warn);
        set_level("nonsense");
        assert_eq!(log::max_level(), log::LevelFilter::Info);
    }
}
