//! Error case coverage analysis rule
//!
//! Only speaks up once a file demonstrably tests success statuses (200, 201,
//! 204). If none of the 4xx/5xx evidence is present alongside them, the suite
//! is happy-path only.

use super::{any_match, compile_all, compile_one, AnalysisRule};
use crate::parser::AnalysisTarget;
use crate::{Check, Finding};
use regex::Regex;
use std::sync::OnceLock;

const HAPPY_PATH_ONLY: &str =
    "Only success cases (2xx) tested. Consider adding error case tests (4xx).";

/// Rule for analyzing error path coverage
pub struct ErrorCoverageRule;

fn error_test_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        compile_all(&[
            r"(?i)(400|401|403|404|422|500|502|503)",
            r"(?i)test.*error",
            r"(?i)test.*fail",
            r"(?i)test.*invalid",
            r"(?i)expect.*toThrow",
            r"(?i)expect.*status.*4\d{2}",
        ])
    })
}

fn success_status_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| compile_one(r"200|201|204"))
}

impl ErrorCoverageRule {
    pub fn new() -> Self {
        Self
    }

    /// Occurrences of 2xx success status literals
    pub fn success_count(content: &str) -> usize {
        success_status_pattern().find_iter(content).count()
    }

    pub fn has_error_tests(content: &str) -> bool {
        any_match(error_test_patterns(), content)
    }
}

impl Default for ErrorCoverageRule {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisRule for ErrorCoverageRule {
    fn check(&self) -> Check {
        Check::ErrorCoverage
    }

    fn is_applicable(&self, target: &AnalysisTarget) -> bool {
        Self::success_count(target.content()) > 0
    }

    fn analyze(&self, target: &AnalysisTarget) -> Vec<Finding> {
        if Self::has_error_tests(target.content()) {
            return Vec::new();
        }
        vec![Finding::warning(Check::ErrorCoverage, HAPPY_PATH_ONLY)]
    }
}
