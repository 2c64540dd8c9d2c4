//! Response validation: responses should be checked against their shape.

use super::{any_match, compile_all, compile_one, AnalysisRule};
use crate::parser::AnalysisTarget;
use crate::{Check, Finding};
use regex::Regex;
use std::sync::OnceLock;

const NO_VALIDATION: &str =
    "No response validation found. Contract tests should validate response structure.";
const WEAK_VALIDATION: &str = "Response assertions found but no explicit schema validation. \
Consider using schema validators (Zod, Joi, etc.)";

/// Rule that grades how responses are asserted.
pub struct ResponseValidationRule;

fn response_assertion_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| compile_one(r"expect\(response"))
}

/// Structural or schema-level validation of a response
fn strong_validation_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        compile_all(&[
            r"expect\(response\.body\)\.toMatchSchema",
            r"expect\(response\.data\)\.toMatchObject",
            r"\.validate\(response",
            r"schema\.parse\(response",
            r"expect\(response\)\.toHaveProperty",
        ])
    })
}

impl ResponseValidationRule {
    pub fn new() -> Self {
        Self
    }

    /// Number of `expect(response...` assertions in the file
    pub fn response_assertion_count(content: &str) -> usize {
        response_assertion_pattern().find_iter(content).count()
    }

    pub fn has_strong_validation(content: &str) -> bool {
        any_match(strong_validation_patterns(), content)
    }
}

impl Default for ResponseValidationRule {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisRule for ResponseValidationRule {
    fn check(&self) -> Check {
        Check::ResponseValidation
    }

    fn analyze(&self, target: &AnalysisTarget) -> Vec<Finding> {
        let content = target.content();
        let assertions = Self::response_assertion_count(content);

        if assertions == 0 {
            vec![Finding::warning(Check::ResponseValidation, NO_VALIDATION)]
        } else if !Self::has_strong_validation(content) {
            vec![Finding::info(Check::ResponseValidation, WEAK_VALIDATION)]
        } else {
            Vec::new()
        }
    }
}
