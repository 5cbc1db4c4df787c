//! UI helpers for consistent console output.

use colored::Colorize;

/// Format a success message.
pub fn success(message: &str) -> String {
    format!("{} {}", "✓".green().bold(), message.green())
}

/// Format a warning message.
pub fn warning(message: &str) -> String {
    format!("{} {}", "⚠".yellow().bold(), message.yellow())
}

/// Format an info message.
pub fn info(message: &str) -> String {
    format!("{} {}", "ℹ".blue().bold(), message)
}

/// Format a section header.
pub fn section(title: &str) -> String {
    format!("{}\n{}", title.cyan().bold(), "─".repeat(title.chars().count()).bright_black())
}

/// Print an error message to stderr.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}
