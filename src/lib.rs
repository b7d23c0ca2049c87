//! chakra-refactor library for detecting and fixing generic Chakra UI elements.
//!
//! This library provides programmatic access to the replacement
//! functionality. The core workflow involves three phases:
//!
//! 1. **Scanning**: Collect JSX-capable files and lower each into plain
//!    element and import-binding data
//! 2. **Analysis**: Resolve each element's import origin, classify its
//!    attributes against the replacement table, and plan text edits
//! 3. **Rewriting**: Apply the edit batches to source files
//!
//! # Example
//!
//! ```no_run
//! use chakra_refactor::{analyzer, scanner};
//! use std::path::PathBuf;
//!
//! let files = scanner::collect_source_files(&[PathBuf::from("./src")], &[], true).unwrap();
//! for file in &files {
//!     let source = std::fs::read_to_string(file).unwrap();
//!     let analysis = analyzer::analyze_source(&source, file).unwrap();
//!     for finding in &analysis.findings {
//!         println!("{}: {}", file.display(), finding.message());
//!     }
//! }
//! ```

pub mod analyzer;
pub mod classifier;
pub mod planner;
pub mod resolver;
pub mod rewriter;
pub mod scanner;

// Re-export commonly used types at crate root
pub use analyzer::{DetectionResult, Diagnostics, Finding};
pub use planner::{FixPlan, PlanError, TextEdit};
