//! Terminal colors for CLI output
//! Colors switch off automatically when stdout is not a terminal or NO_COLOR is set

use colored::Colorize;

/// Text formatting utilities
pub struct Theme;

impl Theme {
    pub fn primary(text: &str) -> String {
        text.bold().to_string()
    }

    pub fn success(text: &str) -> String {
        text.green().to_string()
    }

    pub fn warning(text: &str) -> String {
        text.yellow().to_string()
    }

    pub fn error(text: &str) -> String {
        text.red().bold().to_string()
    }

    /// Secondary information (paths, hints)
    pub fn muted(text: &str) -> String {
        text.dimmed().to_string()
    }

    pub fn header(text: &str) -> String {
        text.cyan().bold().to_string()
    }

    pub fn command(text: &str) -> String {
        text.cyan().to_string()
    }

    /// Plain divider line
    pub fn divider(width: usize) -> String {
        "-".repeat(width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styling_keeps_text() {
        assert!(Theme::success("done").contains("done"));
        assert!(Theme::muted("/var/tmp").contains("/var/tmp"));
        assert_eq!(Theme::divider(3), "---");
    }
}
