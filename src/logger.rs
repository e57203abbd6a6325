//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` / `debug_do!` for output that only appears in verbose mode
//!
//! # Example
//!
//! ```ignore
//! log!("patch"; "replaced {} nodes", count);
//! debug!("patch"; "index {} classified as {}", index, change);
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set from `[reconcile] verbose` or directly)
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
// Log Macro
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

/// Log a debug message (only shown in verbose mode)
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

/// Execute code only in verbose mode
///
/// Use this to avoid computing expensive debug data when not needed.
///
/// # Usage
/// ```ignore
/// debug_do! {
///     let size = tree.size();
///     debug!("patch"; "tree has {} nodes", size);
/// }
/// ```
#[macro_export]
macro_rules! debug_do {
    ($($body:tt)*) => {{
        if $crate::logger::is_verbose() {
            $($body)*
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "patch" => prefix.bright_blue().bold().to_string(),
        "host" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorize_prefix_keeps_module_name() {
        for module in ["patch", "host", "error", "warning"] {
            let prefix = colorize_prefix(module, module);
            assert!(prefix.contains(&format!("[{module}]")));
        }
    }

    #[test]
    fn test_colorize_prefix_case_insensitive_match() {
        let upper = colorize_prefix("PATCH", "patch");
        let lower = colorize_prefix("patch", "patch");
        // Same color codes, different label text
        assert_eq!(upper.len(), lower.len());
        assert!(upper.contains("[PATCH]"));
    }
}
