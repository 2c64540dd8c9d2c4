//! Test file loading: full text plus line-numbered view

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to load the file under analysis
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Test file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read test file {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A loaded test file. Read-only once created.
#[derive(Debug, Clone)]
pub struct AnalysisTarget {
    path: PathBuf,
    content: String,
    lines: Vec<String>,
}

impl AnalysisTarget {
    /// Read a test file from disk
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        let bytes = fs::read(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        // Test files occasionally carry stray Latin-1 bytes; those never matter to the patterns.
        let content = String::from_utf8_lossy(&bytes).into_owned();
        Ok(Self::from_source(path, content))
    }

    /// Build a target from in-memory content (stdin, tests)
    pub fn from_source(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let content = content.into();
        let lines = content.split('\n').map(str::to_string).collect();
        Self {
            path: path.into(),
            content,
            lines,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entire file text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Lines split on '\n'; an empty file has one empty line
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// (1-based line number, line text) pairs
    pub fn numbered_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| (i + 1, line.as_str()))
    }
}
