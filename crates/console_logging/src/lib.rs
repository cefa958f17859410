#![deny(missing_docs)]
//! Shared logging utilities for the demo console workspace.
//!
//! This crate provides the `console_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every macro prefixes
//! the message with the request id currently in scope on the calling thread,
//! so log lines from the message loop can be correlated with engine lines.

use std::cell::Cell;

thread_local! {
    /// Request id the current thread is working on, 0 when none.
    static REQUEST_SCOPE: Cell<u64> = const { Cell::new(0) };
}

/// Marks `request_id` as the request the current thread is handling.
/// Pass `None` once the thread is no longer working on behalf of a request.
pub fn set_request_scope(request_id: Option<u64>) {
    REQUEST_SCOPE.with(|v| v.set(request_id.unwrap_or(0)));
}

/// Returns the request id in scope for the current thread, if any.
pub fn request_scope() -> Option<u64> {
    match REQUEST_SCOPE.with(|v| v.get()) {
        0 => None,
        id => Some(id),
    }
}

/// Runs `f` with `request_id` in scope, restoring the previous scope afterwards.
pub fn with_request_scope<R>(request_id: u64, f: impl FnOnce() -> R) -> R {
    let previous = request_scope();
    set_request_scope(Some(request_id));
    let out = f();
    set_request_scope(previous);
    out
}

#[doc(hidden)]
pub fn scope_prefix() -> String {
    match request_scope() {
        Some(id) => format!("[req {id}] "),
        None => String::new(),
    }
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! console_trace {
    ($($arg:tt)*) => {{
        log::trace!("{}{}", $crate::scope_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! console_info {
    ($($arg:tt)*) => {{
        log::info!("{}{}", $crate::scope_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! console_debug {
    ($($arg:tt)*) => {{
        log::debug!("{}{}", $crate::scope_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! console_warn {
    ($($arg:tt)*) => {{
        log::warn!("{}{}", $crate::scope_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! console_error {
    ($($arg:tt)*) => {{
        log::error!("{}{}", $crate::scope_prefix(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may already have installed a logger.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
