//! Terminal output formatting utilities.
//!
//! stdout is reserved for results a pipeline captures (the resolved tag);
//! everything meant for humans goes to stderr.

use colored::Colorize;

/// Print an error message (always prints to stderr).
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a warning message (always prints to stderr).
pub fn warn(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print essential machine-readable output (always prints).
///
/// Use for results that should be available for piping, like the tag.
pub fn essential(msg: &str) {
    println!("{msg}");
}
