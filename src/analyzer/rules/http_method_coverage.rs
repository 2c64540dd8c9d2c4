//! HTTP method coverage for API tests.
//!
//! Only applies to files that look like API tests. A method counts as
//! exercised when it is called (`.get(`), declared as a request method
//! (`method: 'GET'`) or named in a test title. Any uppercase method name that
//! appears in the file without being exercised is reported, including mentions
//! in comments.

use super::{any_match, compile_all, compile_one, AnalysisRule};
use crate::parser::AnalysisTarget;
use crate::{Check, Finding};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// HTTP methods tracked by the coverage check, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    fn from_verb(verb: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == verb)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule that looks for HTTP methods mentioned but never exercised.
pub struct HttpMethodCoverageRule;

fn api_test_indicators() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        compile_all(&[
            r"(?i)describe.*api",
            r"(?i)describe.*endpoint",
            r"(?i)test.*(GET|POST|PUT|DELETE|PATCH)",
            r"(?i)request\(",
            r"(?i)axios\.",
            r"(?i)fetch\(",
        ])
    })
}

/// Per-method evidence that the method is actually exercised
fn exercised_patterns() -> &'static [(HttpMethod, Vec<Regex>)] {
    static PATTERNS: OnceLock<Vec<(HttpMethod, Vec<Regex>)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        HttpMethod::ALL
            .into_iter()
            .map(|method| {
                let verb = method.as_str();
                let call = format!(r"(?i)\.{}\(", verb.to_lowercase());
                let field = format!(r#"(?i)method:\s*["']({verb})["']"#);
                let title = format!(r#"(?i)test\(["'].*{verb}"#);
                (method, compile_all(&[call.as_str(), field.as_str(), title.as_str()]))
            })
            .collect()
    })
}

fn declared_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| compile_one(r"(GET|POST|PUT|DELETE|PATCH)"))
}

impl HttpMethodCoverageRule {
    pub fn new() -> Self {
        Self
    }

    /// Whether the file looks like it exercises an HTTP endpoint
    pub fn is_api_test(content: &str) -> bool {
        any_match(api_test_indicators(), content)
    }

    /// Methods with direct evidence of being exercised
    pub fn exercised_methods(content: &str) -> BTreeSet<HttpMethod> {
        exercised_patterns()
            .iter()
            .filter(|(_, patterns)| any_match(patterns, content))
            .map(|(method, _)| *method)
            .collect()
    }

    /// Methods whose uppercase name appears anywhere in the file
    pub fn declared_methods(content: &str) -> BTreeSet<HttpMethod> {
        declared_pattern()
            .find_iter(content)
            .filter_map(|m| HttpMethod::from_verb(m.as_str()))
            .collect()
    }
}

impl Default for HttpMethodCoverageRule {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisRule for HttpMethodCoverageRule {
    fn check(&self) -> Check {
        Check::HttpMethodCoverage
    }

    fn is_applicable(&self, target: &AnalysisTarget) -> bool {
        Self::is_api_test(target.content())
    }

    fn analyze(&self, target: &AnalysisTarget) -> Vec<Finding> {
        let content = target.content();
        let exercised = Self::exercised_methods(content);
        let untested: Vec<&str> = Self::declared_methods(content)
            .difference(&exercised)
            .map(HttpMethod::as_str)
            .collect();

        if untested.is_empty() {
            return Vec::new();
        }

        vec![Finding::warning(
            Check::HttpMethodCoverage,
            format!("HTTP methods declared but not tested: {}", untested.join(", ")),
        )]
    }
}
