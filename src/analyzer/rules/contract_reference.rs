//! Contract reference: a contract test must point at a contract.
//!
//! Passes when the file imports something schema/type/contract shaped, or
//! calls into a schema validator (Zod, Joi, AJV, `.validate(`, `.parse(`).
//! Otherwise one whole-file CRITICAL finding is reported.

use super::{any_match, compile_all, AnalysisRule};
use crate::parser::AnalysisTarget;
use crate::{Check, Finding};
use regex::Regex;
use std::sync::OnceLock;

const MISSING_CONTRACT: &str = "Test does not reference any schemas, types, or contracts. \
Contract tests should validate against defined contracts.";

/// Rule that requires some linkage to a formal contract.
pub struct ContractReferenceRule;

/// JS/TS `import ... from` and Python `from ... import` of contract modules
fn schema_import_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        compile_all(&[
            r"(?i)import.*Schema.*from",
            r"(?i)import.*Type.*from",
            r"(?i)import.*Contract.*from",
            r"(?i)from.*schemas.*import",
            r"(?i)from.*types.*import",
            r"(?i)from.*contracts.*import",
        ])
    })
}

fn schema_usage_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        compile_all(&[
            r"\.validate\(",
            r"\.parse\(",
            r"z\.",   // Zod
            r"Joi\.", // Joi
            r"ajv\.", // AJV
            r"validateSchema\(",
        ])
    })
}

impl ContractReferenceRule {
    pub fn new() -> Self {
        Self
    }

    pub fn has_schema_import(content: &str) -> bool {
        any_match(schema_import_patterns(), content)
    }

    pub fn has_schema_usage(content: &str) -> bool {
        any_match(schema_usage_patterns(), content)
    }
}

impl Default for ContractReferenceRule {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisRule for ContractReferenceRule {
    fn check(&self) -> Check {
        Check::ContractReference
    }

    fn analyze(&self, target: &AnalysisTarget) -> Vec<Finding> {
        let content = target.content();
        if Self::has_schema_import(content) || Self::has_schema_usage(content) {
            return Vec::new();
        }
        vec![Finding::critical(Check::ContractReference, MISSING_CONTRACT)]
    }
}
