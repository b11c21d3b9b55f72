//! Terminal styling for human-readable output.
//!
//! Styles are applied only when stdout is a terminal and `NO_COLOR` is unset, so piped output
//! and test captures stay plain.

use std::{
    env,
    io::{self, IsTerminal},
};

/// ANSI color codes for terminal output.
mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text (for headers).
    pub const CYAN: &str = "\x1b[36m";
    /// Yellow text (for warnings).
    pub const YELLOW: &str = "\x1b[33m";
    /// Dim text.
    pub const DIM: &str = "\x1b[2m";
    /// Reset all attributes.
    pub const RESET: &str = "\x1b[0m";
}

/// Whether styled output should be emitted.
fn enabled() -> bool {
    env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal()
}

/// Wraps `text` in the given codes when styling is enabled.
fn paint(codes: &[&str], text: &str) -> String {
    if enabled() {
        format!("{}{text}{}", codes.concat(), colors::RESET)
    } else {
        text.to_string()
    }
}

/// Formats a header with bold cyan styling.
pub fn header(text: &str) -> String {
    paint(&[colors::BOLD, colors::CYAN], text)
}

/// Formats text as a subheader (bold).
pub fn subheader(text: &str) -> String {
    paint(&[colors::BOLD], text)
}

/// Formats text as dimmed/less important.
pub fn dim(text: &str) -> String {
    paint(&[colors::DIM], text)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    paint(&[colors::YELLOW], text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_keep_text() {
        for styled in [header("Test"), subheader("Test"), dim("Test"), warning("Test")] {
            assert!(styled.contains("Test"));
            if styled.len() > "Test".len() {
                assert!(styled.ends_with(colors::RESET));
            }
        }
    }
}
