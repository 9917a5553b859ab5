#![deny(missing_docs)]
//! Shared logging utilities for the harvester workspace.
//!
//! This crate provides the `harvest_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger.
//!
//! Every macro accepts an optional `site: <expr>,` prefix. When present the
//! message is rendered as `[<site>] <message>` so interleaved output from
//! concurrent site harvests stays attributable.

#[doc(hidden)]
pub use log;

/// Logs a trace-level message, optionally tagged with a site id.
#[macro_export]
macro_rules! harvest_trace {
    (site: $site:expr, $($arg:tt)+) => {{
        $crate::log::trace!("[{}] {}", $site, format_args!($($arg)+));
    }};
    ($($arg:tt)+) => {{
        $crate::log::trace!($($arg)+);
    }};
}

/// Logs a debug-level message, optionally tagged with a site id.
#[macro_export]
macro_rules! harvest_debug {
    (site: $site:expr, $($arg:tt)+) => {{
        $crate::log::debug!("[{}] {}", $site, format_args!($($arg)+));
    }};
    ($($arg:tt)+) => {{
        $crate::log::debug!($($arg)+);
    }};
}

/// Logs an info-level message, optionally tagged with a site id.
#[macro_export]
macro_rules! harvest_info {
    (site: $site:expr, $($arg:tt)+) => {{
        $crate::log::info!("[{}] {}", $site, format_args!($($arg)+));
    }};
    ($($arg:tt)+) => {{
        $crate::log::info!($($arg)+);
    }};
}

/// Logs a warn-level message, optionally tagged with a site id.
#[macro_export]
macro_rules! harvest_warn {
    (site: $site:expr, $($arg:tt)+) => {{
        $crate::log::warn!("[{}] {}", $site, format_args!($($arg)+));
    }};
    ($($arg:tt)+) => {{
        $crate::log::warn!($($arg)+);
    }};
}

/// Logs an error-level message, optionally tagged with a site id.
#[macro_export]
macro_rules! harvest_error {
    (site: $site:expr, $($arg:tt)+) => {{
        $crate::log::error!("[{}] {}", $site, format_args!($($arg)+));
    }};
    ($($arg:tt)+) => {{
        $crate::log::error!($($arg)+);
    }};
}

/// Parses a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`).
///
/// Matching is case-insensitive; unknown names yield `None`.
pub fn parse_level(name: &str) -> Option<log::LevelFilter> {
    name.trim().parse::<log::LevelFilter>().ok()
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::parse_level;

    #[test]
    fn level_names_are_case_insensitive() {
        assert_eq!(parse_level("INFO"), Some(log::LevelFilter::Info));
        assert_eq!(parse_level(" debug "), Some(log::LevelFilter::Debug));
        assert_eq!(parse_level("off"), Some(log::LevelFilter::Off));
        assert_eq!(parse_level("chatty"), None);
    }

    #[test]
    fn macros_accept_site_prefix() {
        super::initialize_for_tests();
        harvest_info!(site: "anto", "listing fetched ({} bytes)", 42);
        harvest_warn!("plain message {}", 1);
    }
}
