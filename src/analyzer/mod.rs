//! Analyzer module - semantic check battery

pub mod engine;
pub mod rules;

pub use engine::AnalysisEngine;
