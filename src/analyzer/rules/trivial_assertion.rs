//! Trivial assertions: tests that pass no matter what the code does.
//!
//! Flags assertions that compare a literal to itself or assert a constant,
//! e.g. expect(true).toBe(true), assert True, self.assertTrue(True), or
//! expect('ok').toBe('ok'). Such tests add a false sense of coverage.
//!
//! Every matching (line, pattern) pair is reported, so a line hit by two
//! patterns yields two findings.

use super::{compile_all, AnalysisRule};
use crate::parser::AnalysisTarget;
use crate::{Check, Finding};
use regex::Regex;
use std::sync::OnceLock;

/// Rule that detects tautological assertions line by line.
pub struct TrivialAssertionRule;

fn trivial_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        compile_all(&[
            r"expect\(true\)\.toBe\(true\)",
            r"expect\(false\)\.toBe\(false\)",
            r"expect\(1\)\.toBe\(1\)",
            r"assert True",
            r"assert 1 == 1",
            r"self\.assertTrue\(True\)",
            // string literal against string literal
            r#"expect\(["'].*["']\)\.toBe\(["'].*["']\)"#,
        ])
    })
}

impl TrivialAssertionRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TrivialAssertionRule {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisRule for TrivialAssertionRule {
    fn check(&self) -> Check {
        Check::TrivialAssertion
    }

    fn analyze(&self, target: &AnalysisTarget) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (line_no, line) in target.numbered_lines() {
            for pattern in trivial_patterns() {
                if pattern.is_match(line) {
                    findings.push(
                        Finding::critical(
                            Check::TrivialAssertion,
                            format!("Trivial assertion found: {}", line.trim()),
                        )
                        .at_line(line_no),
                    );
                }
            }
        }

        findings
    }
}
