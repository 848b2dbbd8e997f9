#![deny(missing_docs)]
//! Shared logging utilities for the QuickDocs workspace.
//!
//! Every crate logs through the `qd_*` macros so that all records share the
//! `quickdocs` target prefix and can be filtered as one unit.

/// Target prefix used by every `qd_*` macro.
pub const LOG_TARGET: &str = "quickdocs";

/// Logs a trace-level message under the workspace target.
#[macro_export]
macro_rules! qd_trace {
    ($($arg:tt)*) => {{
        log::trace!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message under the workspace target.
#[macro_export]
macro_rules! qd_debug {
    ($($arg:tt)*) => {{
        log::debug!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs an info-level message under the workspace target.
#[macro_export]
macro_rules! qd_info {
    ($($arg:tt)*) => {{
        log::info!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message under the workspace target.
#[macro_export]
macro_rules! qd_warn {
    ($($arg:tt)*) => {{
        log::warn!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs an error-level message under the workspace target.
#[macro_export]
macro_rules! qd_error {
    ($($arg:tt)*) => {{
        log::error!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Initializes a terminal logger for tests.
///
/// Safe to call from every test: later calls no-op once a logger is set.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}
