//! Reporter module for output formatting

pub mod console;
pub mod json;

pub use console::ConsoleReporter;
pub use json::JsonReporter;

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// `json` selects JSON; anything else falls back to text
    pub fn parse_lenient(value: &str) -> Self {
        if value == "json" {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}
