//! Configuration loading for semtest

mod schema;

pub use schema::{CheckSeverity, Config, ConfigOverride, EffectiveConfig};

use anyhow::{Context, Result};
use globset::Glob;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".semtestrc.json";

/// Find and load config file with extends resolution.
///
/// An explicit `custom_path` must exist and load cleanly. Otherwise the work
/// directory and its parents are searched; a discovered file that cannot be
/// loaded is skipped with a warning, and no config file means defaults.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    if let Some(p) = custom_path {
        let path = if p.is_absolute() || p.exists() {
            p.to_path_buf()
        } else {
            work_dir.join(p)
        };
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", p.display());
        }
        return load_config_file(&path);
    }

    match find_config_in_parents(work_dir) {
        Some(path) => match load_config_file(&path) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!(
                    config = %path.display(),
                    error = %format!("{:#}", e),
                    "ignoring unusable config; using defaults"
                );
                Ok(Config::default())
            }
        },
        None => Ok(Config::default()),
    }
}

fn load_config_file(path: &Path) -> Result<Config> {
    tracing::debug!(config = %path.display(), "loading config");
    let config = load_config_with_extends(path, &mut HashSet::new())?;
    validate_globs(&config).with_context(|| format!("Invalid config: {}", path.display()))?;
    Ok(config)
}

/// Load a config file and resolve extends chain
fn load_config_with_extends(config_path: &Path, visited: &mut HashSet<PathBuf>) -> Result<Config> {
    let canonical = config_path
        .canonicalize()
        .unwrap_or_else(|_| config_path.to_path_buf());
    if !visited.insert(canonical) {
        anyhow::bail!(
            "Circular extends detected in config: {}",
            config_path.display()
        );
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    let mut config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in config: {}", config_path.display()))?;

    if let Some(extends) = config.extends.take() {
        let base_config = resolve_extends(config_path, &extends, visited)?;
        config.merge_from(base_config);
    }

    Ok(config)
}

/// Resolve an extends reference relative to the referencing config
fn resolve_extends(
    config_path: &Path,
    extends: &str,
    visited: &mut HashSet<PathBuf>,
) -> Result<Config> {
    let config_dir = config_path.parent().unwrap_or(Path::new("."));
    let extends_path = config_dir.join(extends);

    let extends_path = if extends_path.extension().is_none() {
        extends_path.with_extension("json")
    } else {
        extends_path
    };

    if !extends_path.exists() {
        anyhow::bail!(
            "Extended config not found: {} (referenced from {})",
            extends_path.display(),
            config_path.display()
        );
    }

    load_config_with_extends(&extends_path, visited)
}

/// Search for .semtestrc.json in directory and its parents
fn find_config_in_parents(dir: &Path) -> Option<PathBuf> {
    let start = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
    let mut dir = start.as_path();
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

fn validate_globs(config: &Config) -> Result<()> {
    for pattern in config.glob_patterns() {
        Glob::new(pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))?;
    }
    Ok(())
}
