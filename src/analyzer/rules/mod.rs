//! Checks that make up the analysis battery

pub mod contract_reference;
pub mod error_coverage;
pub mod http_method_coverage;
pub mod response_validation;
pub mod trivial_assertion;

pub use contract_reference::ContractReferenceRule;
pub use error_coverage::ErrorCoverageRule;
pub use http_method_coverage::{HttpMethod, HttpMethodCoverageRule};
pub use response_validation::ResponseValidationRule;
pub use trivial_assertion::TrivialAssertionRule;

use crate::parser::AnalysisTarget;
use crate::{Check, Finding};
use regex::Regex;

/// Trait for analysis rules
pub trait AnalysisRule {
    /// Check this rule reports under
    fn check(&self) -> Check;

    /// Name of the rule
    fn name(&self) -> &'static str {
        self.check().id()
    }

    /// Whether the rule applies to this file at all. Inapplicable rules
    /// produce no findings.
    fn is_applicable(&self, _target: &AnalysisTarget) -> bool {
        true
    }

    /// Scan the target and return findings. Only called when applicable.
    fn analyze(&self, target: &AnalysisTarget) -> Vec<Finding>;

    /// Applicability gate followed by the scan
    fn run(&self, target: &AnalysisTarget) -> Vec<Finding> {
        if self.is_applicable(target) {
            self.analyze(target)
        } else {
            Vec::new()
        }
    }
}

/// Compile a fixed pattern table. Patterns are literals in this crate, so a
/// failure is a programming error caught by each rule's tests.
pub(crate) fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| compile_one(p))
        .collect()
}

/// Compile a single built-in pattern
pub(crate) fn compile_one(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern:?}: {e}"))
}

/// True if any pattern matches anywhere in `text`
pub(crate) fn any_match(patterns: &[Regex], text: &str) -> bool {
    patterns.iter().any(|re| re.is_match(text))
}

/// The default battery, in reporting order
pub fn default_rules() -> Vec<Box<dyn AnalysisRule>> {
    vec![
        Box::new(TrivialAssertionRule::new()),
        Box::new(ContractReferenceRule::new()),
        Box::new(HttpMethodCoverageRule::new()),
        Box::new(ResponseValidationRule::new()),
        Box::new(ErrorCoverageRule::new()),
    ]
}
