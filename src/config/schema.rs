//! Config schema and deserialization

use crate::{Check, Severity};
use globset::Glob;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Check severity override (critical, warning, info, off)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckSeverity {
    Critical,
    Warning,
    Info,
    /// Disable the check entirely
    Off,
}

impl CheckSeverity {
    /// Convert to crate::Severity if not Off
    pub fn to_severity(self) -> Option<Severity> {
        match self {
            CheckSeverity::Critical => Some(Severity::Critical),
            CheckSeverity::Warning => Some(Severity::Warning),
            CheckSeverity::Info => Some(Severity::Info),
            CheckSeverity::Off => None,
        }
    }
}

/// Per-path override configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverride {
    /// Glob patterns this override applies to
    pub files: Vec<String>,

    /// Check overrides for matched files
    #[serde(default)]
    pub checks: HashMap<String, CheckSeverity>,
}

/// Root config structure for .semtestrc.json
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default)]
    pub extends: Option<String>,

    /// Per-check severity overrides. Key is the check id (snake or kebab case).
    #[serde(default)]
    pub checks: HashMap<String, CheckSeverity>,

    /// Glob patterns for files that are never analyzed
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Per-path configuration overrides
    #[serde(default)]
    pub overrides: Vec<ConfigOverride>,
}

impl Config {
    /// Get effective config for a specific file path, applying overrides
    pub fn effective_for_file(&self, file_path: &Path) -> EffectiveConfig {
        let mut effective = EffectiveConfig {
            checks: HashMap::new(),
            ignored: matches_any(file_path, &self.ignore),
        };
        effective.apply(&self.checks);

        // Apply matching overrides in order
        for override_cfg in &self.overrides {
            if matches_any(file_path, &override_cfg.files) {
                effective.apply(&override_cfg.checks);
            }
        }

        effective
    }

    /// Every glob pattern in this config (ignore and overrides)
    pub fn glob_patterns(&self) -> impl Iterator<Item = &str> {
        self.ignore
            .iter()
            .chain(self.overrides.iter().flat_map(|o| o.files.iter()))
            .map(String::as_str)
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        if self.extends.is_none() {
            self.extends = base.extends;
        }

        // This config's checks take precedence
        for (check, severity) in base.checks {
            self.checks.entry(check).or_insert(severity);
        }

        let mut all_ignores = base.ignore;
        all_ignores.append(&mut self.ignore);
        self.ignore = all_ignores;

        // Prepend base overrides so ours apply last
        let mut all_overrides = base.overrides;
        all_overrides.append(&mut self.overrides);
        self.overrides = all_overrides;
    }
}

/// Effective configuration for a specific file (after applying overrides)
#[derive(Debug, Clone, Default)]
pub struct EffectiveConfig {
    pub checks: HashMap<Check, CheckSeverity>,
    /// File matches an ignore pattern
    pub ignored: bool,
}

impl EffectiveConfig {
    fn apply(&mut self, checks: &HashMap<String, CheckSeverity>) {
        for (id, severity) in checks {
            match Check::from_id(id) {
                Some(check) => {
                    self.checks.insert(check, *severity);
                }
                None => tracing::warn!(check = %id, "unknown check id in config; ignoring"),
            }
        }
    }

    /// Configured severity for a check, if any
    pub fn check_severity(&self, check: Check) -> Option<CheckSeverity> {
        self.checks.get(&check).copied()
    }

    pub fn is_disabled(&self, check: Check) -> bool {
        self.check_severity(check) == Some(CheckSeverity::Off)
    }
}

/// Check if a file path matches any of the glob patterns
fn matches_any(file_path: &Path, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| match Glob::new(pattern) {
        Ok(glob) => glob.compile_matcher().is_match(file_path),
        Err(e) => {
            tracing::warn!(pattern = %pattern, error = %e, "invalid glob in config");
            false
        }
    })
}
