//! Console reporter with colored output

use crate::{Finding, RunResult, Severity};
use colored::Colorize;
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Print the report for a run to stdout
    pub fn report(&self, result: &RunResult) {
        print!("{}", self.render(result));
    }

    /// Render the report as text
    pub fn render(&self, result: &RunResult) -> String {
        let mut out = String::new();
        let file = result.file.display();

        if result.is_clean() {
            let line = format!("✅ {}: All semantic checks passed", file);
            let _ = writeln!(out, "{}", self.paint(&line, Severity::Info, true));
            return out;
        }

        let _ = writeln!(out, "Semantic Validation Results: {}", file);
        let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));

        for severity in [Severity::Critical, Severity::Warning, Severity::Info] {
            let bucket = result.bucket(severity);
            if bucket.is_empty() {
                continue;
            }
            let title = format!("{} ({}):", Self::bucket_title(severity), bucket.len());
            let _ = writeln!(out, "\n{}", self.paint(&title, severity, false));
            for finding in bucket {
                let _ = writeln!(out, "{}", Self::format_finding(finding));
            }
        }

        out
    }

    fn bucket_title(severity: Severity) -> &'static str {
        match severity {
            Severity::Critical => "❌ CRITICAL ISSUES",
            Severity::Warning => "⚠️  WARNINGS",
            Severity::Info => "ℹ️  INFO",
        }
    }

    /// `  - [check] (line N): message`
    fn format_finding(finding: &Finding) -> String {
        let line_info = finding
            .line
            .map(|l| format!(" (line {})", l))
            .unwrap_or_default();
        format!("  - [{}]{}: {}", finding.check, line_info, finding.message)
    }

    fn paint(&self, text: &str, severity: Severity, success: bool) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        if success {
            return text.green().bold().to_string();
        }
        match severity {
            Severity::Critical => text.red().bold().to_string(),
            Severity::Warning => text.yellow().bold().to_string(),
            Severity::Info => text.blue().bold().to_string(),
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
