//! Terminal output formatting.
//!
//! Status lines (`✓`, `⚠`, `✗`) and plain data lines go through
//! [`OutputHandler`] so every command honors `NO_COLOR` and TTY detection the
//! same way.

pub mod colors;
pub mod errors;

use colors::ColorSupport;

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: ColorSupport,
}

impl OutputHandler {
    pub fn new() -> Self {
        Self::with_colors(ColorSupport::detect())
    }

    pub fn with_colors(colors: ColorSupport) -> Self {
        Self { colors }
    }

    /// Print a data line unchanged
    pub fn print(&self, message: &str) {
        println!("{}", message);
    }

    /// Print a `label: value` line
    pub fn field(&self, label: &str, value: &str) {
        println!("{}", self.format_field(label, value));
    }

    /// Print a JSON document
    pub fn json(&self, value: &serde_json::Value) {
        println!("{}", format_json(value));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        println!("{}", self.colors.dim(message));
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{} {}", self.colors.green("✓"), message);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", self.colors.yellow("⚠"), message);
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", self.colors.red("✗"), message);
    }

    fn format_field(&self, label: &str, value: &str) -> String {
        format!("{} {}", self.colors.bold(&format!("{label:>10}:")), value)
    }
}

fn format_json(value: &serde_json::Value) -> String {
    format!("{value:#}")
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_field_alignment() {
        let output = OutputHandler::with_colors(ColorSupport::disabled());
        assert_eq!(output.format_field("version", "1.2.3"), "   version: 1.2.3");
        assert_eq!(output.format_field("constraints", ">=1"), "constraints: >=1");
    }

    #[test]
    fn test_json_is_pretty_printed() {
        let value = serde_json::json!({ "version": "1.2.3", "prerelease": false });
        let text = format_json(&value);

        assert!(text.contains("\n  \"version\": \"1.2.3\""));
        assert_eq!(serde_json::from_str::<serde_json::Value>(&text).unwrap(), value);
    }
}
