//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output that only shows up with `--verbose`
//! - `error!` macro for per-file failures, written to stderr
//!
//! # Example
//!
//! ```ignore
//! log!("svg"; "square size: {} x {}", side, side);
//! error!("file not found: {}", path.display());
//! ```

use owo_colors::{OwoColorize, Stream, Style};
use std::{
    io::{Write, stderr, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macros
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

/// Report an error on stderr with a red `[error]` prefix
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        $crate::logger::log_error(&format!($($arg)*))
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let prefix = format!("[{module}]");
    let style = prefix_style(&module.to_ascii_lowercase());

    let mut stdout = stdout().lock();
    writeln!(
        stdout,
        "{} {message}",
        prefix.if_supports_color(Stream::Stdout, |p| p.style(style))
    )
    .ok();
    stdout.flush().ok();
}

/// Write an error line to stderr
pub fn log_error(message: &str) {
    let prefix = "[error]";
    let style = prefix_style("error");

    let mut stderr = stderr().lock();
    writeln!(
        stderr,
        "{} {message}",
        prefix.if_supports_color(Stream::Stderr, |p| p.style(style))
    )
    .ok();
    stderr.flush().ok();
}

/// Pick a prefix color based on module type
#[inline]
fn prefix_style(module_lower: &str) -> Style {
    match module_lower {
        "svg" => Style::new().bright_blue().bold(),
        "raster" => Style::new().bright_magenta().bold(),
        "done" => Style::new().bright_green().bold(),
        "error" => Style::new().bright_red().bold(),
        _ => Style::new().bright_yellow().bold(),
    }
}

/// Format count with noun, handling pluralization
///
/// - `plural_count(0, "file")` -> `"0 files"`
/// - `plural_count(1, "file")` -> `"1 file"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    let s = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{s}")
}

// ============================================================================
// Tests
// ============================================================================
