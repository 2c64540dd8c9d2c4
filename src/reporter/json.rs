//! JSON reporter for machine-readable output

use crate::{Finding, RunResult};
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Render a run as a JSON document
    pub fn report(&self, result: &RunResult) -> String {
        let output = JsonOutput::from(result);
        if self.pretty {
            serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(&output).unwrap_or_else(|_| "{}".to_string())
        }
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Wire shape consumed by CI scripts; field names are fixed.
#[derive(Serialize)]
struct JsonOutput<'a> {
    file: String,
    issues: &'a [Finding],
    critical_count: usize,
    warning_count: usize,
}

impl<'a> From<&'a RunResult> for JsonOutput<'a> {
    fn from(result: &'a RunResult) -> Self {
        Self {
            file: result.file.display().to_string(),
            issues: &result.findings,
            critical_count: result.critical_count(),
            warning_count: result.warning_count(),
        }
    }
}
