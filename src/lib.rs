//! semtest: Semantic Test Validator
//!
//! Static, pattern-based checks over contract and integration test files. The
//! goal is to tell tests that verify something apart from tests that merely
//! exist: trivial assertions, no contract reference, untested HTTP methods,
//! unvalidated responses and happy-path-only suites.

pub mod analyzer;
pub mod config;
pub mod parser;
pub mod reporter;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Severity levels for findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "CRITICAL"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Info => write!(f, "INFO"),
        }
    }
}

/// Checks in the battery. The serialized id is part of the JSON contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    /// Assertion that cannot fail (expect(true).toBe(true))
    TrivialAssertion,
    /// No schema, type or contract referenced anywhere in the file
    ContractReference,
    /// HTTP method mentioned but never exercised
    HttpMethodCoverage,
    /// Response never asserted, or asserted without schema validation
    ResponseValidation,
    /// Only 2xx paths tested
    ErrorCoverage,
}

impl Check {
    /// All checks, in battery order
    pub const ALL: [Check; 5] = [
        Check::TrivialAssertion,
        Check::ContractReference,
        Check::HttpMethodCoverage,
        Check::ResponseValidation,
        Check::ErrorCoverage,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Check::TrivialAssertion => "trivial_assertion",
            Check::ContractReference => "contract_reference",
            Check::HttpMethodCoverage => "http_method_coverage",
            Check::ResponseValidation => "response_validation",
            Check::ErrorCoverage => "error_coverage",
        }
    }

    /// Parse a check id as written in config files.
    /// Accepts the kebab-case spelling too.
    pub fn from_id(id: &str) -> Option<Check> {
        let normalized = id.trim().replace('-', "_");
        Check::ALL.into_iter().find(|c| c.id() == normalized)
    }
}

impl std::fmt::Display for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// A single reported issue. Findings are never mutated after creation;
/// severity remapping produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Severity of the finding
    pub severity: Severity,
    /// Check that produced it
    pub check: Check,
    /// Human-readable message
    pub message: String,
    /// 1-based line number, absent for whole-file findings
    pub line: Option<usize>,
}

impl Finding {
    pub fn new(severity: Severity, check: Check, message: impl Into<String>) -> Self {
        Self {
            severity,
            check,
            message: message.into(),
            line: None,
        }
    }

    pub fn critical(check: Check, message: impl Into<String>) -> Self {
        Self::new(Severity::Critical, check, message)
    }

    pub fn warning(check: Check, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, check, message)
    }

    pub fn info(check: Check, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, check, message)
    }

    /// Attach a 1-based line number
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Same finding with a different severity
    pub fn with_severity(self, severity: Severity) -> Self {
        Self { severity, ..self }
    }
}

/// All findings for one analyzed file. Counts are always derived from
/// `findings`, so they cannot drift from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// Path of the analyzed file, as given on the command line
    pub file: PathBuf,
    /// Findings in emission order
    pub findings: Vec<Finding>,
}

impl RunResult {
    pub fn new(file: impl Into<PathBuf>, findings: Vec<Finding>) -> Self {
        Self {
            file: file.into(),
            findings,
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    pub fn critical_count(&self) -> usize {
        self.count(Severity::Critical)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count(Severity::Info)
    }

    /// Findings of one severity, in emission order
    pub fn bucket(&self, severity: Severity) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_findings(&self.findings)
    }
}

/// Aggregate outcome of a run, mapped to the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No critical or warning findings (info may be present)
    Clean,
    /// Warnings present, no criticals: the pipeline can proceed
    Warnings,
    /// At least one critical finding
    Critical,
}

impl Verdict {
    pub fn from_findings(findings: &[Finding]) -> Self {
        if findings.iter().any(|f| f.severity == Severity::Critical) {
            Verdict::Critical
        } else if findings.iter().any(|f| f.severity == Severity::Warning) {
            Verdict::Warnings
        } else {
            Verdict::Clean
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Verdict::Clean => 0,
            Verdict::Critical => 1,
            Verdict::Warnings => 2,
        }
    }
}

/// Exit code used for usage errors and unreadable input
pub const USAGE_EXIT_CODE: u8 = 2;

/// Public API: analyze a single test file.
///
/// * `path` - path to the test file
/// * `config_path` - optional explicit config; if None, `.semtestrc.json` is
///   searched from the file's directory upward
pub fn analyze_file(path: &Path, config_path: Option<&Path>) -> anyhow::Result<RunResult> {
    let target = crate::parser::AnalysisTarget::load(path)?;
    let work_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let config = crate::config::load_config(work_dir, config_path)?;
    let engine = crate::analyzer::AnalysisEngine::new();
    Ok(engine.analyze(&target, Some(&config)))
}
