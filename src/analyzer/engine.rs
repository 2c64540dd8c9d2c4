//! Analysis engine - runs the check battery over one target

use crate::config::Config;
use crate::parser::AnalysisTarget;
use crate::{Finding, RunResult};

use super::rules::{default_rules, AnalysisRule};

/// Main analysis engine that orchestrates all rules
pub struct AnalysisEngine {
    rules: Vec<Box<dyn AnalysisRule>>,
}

impl AnalysisEngine {
    /// Engine with the full default battery
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    /// Engine with a custom rule set
    pub fn with_rules(rules: Vec<Box<dyn AnalysisRule>>) -> Self {
        Self { rules }
    }

    /// Run every rule over the target. Rule order fixes emission order only.
    pub fn analyze(&self, target: &AnalysisTarget, config: Option<&Config>) -> RunResult {
        let effective = config
            .map(|c| c.effective_for_file(target.path()))
            .unwrap_or_default();

        if effective.ignored {
            tracing::debug!(file = %target.path().display(), "file matches an ignore pattern; skipping");
            return RunResult::new(target.path(), Vec::new());
        }

        let mut findings: Vec<Finding> = Vec::new();
        for rule in &self.rules {
            let check = rule.check();
            let configured = effective.check_severity(check);
            if effective.is_disabled(check) {
                tracing::debug!(check = rule.name(), "disabled by config");
                continue;
            }

            let produced = rule.run(target);
            tracing::debug!(check = rule.name(), findings = produced.len(), "check finished");

            for finding in produced {
                let finding = match configured.and_then(|s| s.to_severity()) {
                    Some(severity) => finding.with_severity(severity),
                    None => finding,
                };
                findings.push(finding);
            }
        }

        RunResult::new(target.path(), findings)
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}
