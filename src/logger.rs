//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output shown only with `--verbose`
//! - `banner` for the framed header/footer lines around a run
//!
//! # Example
//!
//! ```ignore
//! log!("wrap"; "converting {} to {}", src, dest);
//! debug!("exec"; "running `{}`", name);
//! ```

use owo_colors::OwoColorize;
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Width of the `=====` rule printed by [`banner`].
const RULE_WIDTH: usize = 50;

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

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    for line in message.lines() {
        writeln!(stdout, "{prefix} {line}").ok();
    }
    if message.is_empty() {
        writeln!(stdout, "{prefix}").ok();
    }
    stdout.flush().ok();
}

/// Print a framed title, e.g. the start and end of a publish run.
pub fn banner(title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    let mut stdout = stdout().lock();
    writeln!(stdout, "{}", rule.dimmed()).ok();
    writeln!(stdout, "{}", centered(title).bold()).ok();
    writeln!(stdout, "{}", rule.dimmed()).ok();
    stdout.flush().ok();
}

/// Center `title` within the rule width (left-aligned when too long).
fn centered(title: &str) -> String {
    let len = title.chars().count();
    if len >= RULE_WIDTH {
        return title.to_string();
    }
    let pad = (RULE_WIDTH - len) / 2;
    format!("{}{title}", " ".repeat(pad))
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "wrap" | "publish" => prefix.bright_blue().bold().to_string(),
        "done" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        "warning" => prefix.bright_magenta().bold().to_string(),
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
    fn test_verbose_toggle() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }

    #[test]
    fn test_centered_short_title() {
        let line = centered("PUBLISH");
        assert!(line.ends_with("PUBLISH"));
        assert_eq!(line.len(), (RULE_WIDTH - 7) / 2 + 7);
    }

    #[test]
    fn test_centered_long_title_unchanged() {
        let title = "x".repeat(RULE_WIDTH + 3);
        assert_eq!(centered(&title), title);
    }

    #[test]
    fn test_prefix_contains_module_name() {
        assert!(colorize_prefix("build", "build").contains("[build]"));
        assert!(colorize_prefix("Error", "error").contains("[Error]"));
    }
}
