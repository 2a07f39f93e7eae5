//! Terminal color support detection and formatting.
//!
//! Automatic color detection that respects the NO_COLOR environment
//! variable and TTY detection.

use std::env;
use std::io::{self, IsTerminal};

/// Color support detection and formatting
pub struct ColorSupport {
    enabled: bool,
}

impl ColorSupport {
    /// Detect color support automatically
    pub fn detect() -> Self {
        let enabled = Self::should_use_colors();
        Self { enabled }
    }

    /// Force disable colors
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    fn should_use_colors() -> bool {
        if env::var("NO_COLOR").is_ok() {
            return false;
        }

        io::stderr().is_terminal() && io::stdout().is_terminal()
    }

    /// Format text in green
    pub fn green(&self, text: &str) -> String {
        if self.enabled {
            format!("\x1b[32m{}\x1b[0m", text)
        } else {
            text.to_string()
        }
    }

    /// Format text in yellow
    pub fn yellow(&self, text: &str) -> String {
        if self.enabled {
            format!("\x1b[33m{}\x1b[0m", text)
        } else {
            text.to_string()
        }
    }

    /// Format text in red
    pub fn red(&self, text: &str) -> String {
        if self.enabled {
            format!("\x1b[31m{}\x1b[0m", text)
        } else {
            text.to_string()
        }
    }

    /// Format text as dim/gray
    pub fn dim(&self, text: &str) -> String {
        if self.enabled {
            format!("\x1b[2m{}\x1b[0m", text)
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_passes_text_through() {
        let colors = ColorSupport::disabled();
        assert_eq!(colors.green("ok"), "ok");
        assert_eq!(colors.red("bad"), "bad");
    }

    #[test]
    fn test_enabled_wraps_with_escapes() {
        let colors = ColorSupport { enabled: true };
        assert_eq!(colors.green("ok"), "\x1b[32mok\x1b[0m");
        assert!(colors.dim("x").starts_with("\x1b[2m"));
    }
}
