// ABOUTME: Centralized CLI output utilities for consistent user-facing diagnostics
// ABOUTME: Formats errors and hints on stderr with optional color

use owo_colors::OwoColorize;

/// Centralized CLI output utilities for consistent formatting
pub struct CliOutput {
    use_color: bool,
}

impl CliOutput {
    /// Create CLI output utility with explicit color setting
    pub fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", self.format_error(message));
    }

    pub fn hint(&self, message: &str) {
        eprintln!("{}", self.format_hint(message));
    }

    fn format_error(&self, message: &str) -> String {
        if self.use_color {
            format!("{} {}", "error:".red().bold(), message)
        } else {
            format!("error: {}", message)
        }
    }

    fn format_hint(&self, message: &str) -> String {
        if self.use_color {
            format!("{} {}", "hint:".blue().bold(), message)
        } else {
            format!("hint: {}", message)
        }
    }
}
