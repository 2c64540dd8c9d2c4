//! Loading test files

pub mod test_file;

pub use test_file::{AnalysisTarget, LoadError};
