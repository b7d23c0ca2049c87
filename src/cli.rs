//! Command-line interface definitions.
//!
//! Defines the argument parser and subcommands using clap's derive API.
//! Each subcommand corresponds to a distinct operation: checking for
//! replaceable elements, applying fixes, listing scan targets, or printing
//! the replacement rule table.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Detect and fix generic Chakra UI Box elements replaceable by specific components.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan files and report elements replaceable by a specific component.
    Check {
        /// Paths to scan. Defaults to current directory.
        #[arg(short, long)]
        paths: Option<Vec<PathBuf>>,

        /// Glob patterns for entries to exclude (e.g., "node_modules", "*.stories.tsx").
        /// By default, entries starting with `.` or `_` are excluded.
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Disable default exclusion of `.` and `_` prefixed entries.
        #[arg(long)]
        no_default_excludes: bool,

        /// Emit JSON instead of human-readable output.
        #[arg(long)]
        json: bool,

        /// Print additional diagnostics to stderr.
        #[arg(short, long)]
        verbose: bool,
    },

    /// Apply fixes to files.
    Fix {
        /// Actually modify files (default is dry-run).
        #[arg(long)]
        write: bool,

        /// Interactively confirm each file's changes before applying.
        #[arg(short, long)]
        interactive: bool,

        /// Paths to scan. Defaults to current directory.
        #[arg(short, long)]
        paths: Option<Vec<PathBuf>>,

        /// Glob patterns for entries to exclude (e.g., "node_modules", "*.stories.tsx").
        /// By default, entries starting with `.` or `_` are excluded.
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Disable default exclusion of `.` and `_` prefixed entries.
        #[arg(long)]
        no_default_excludes: bool,
    },

    /// List files that would be scanned without processing them.
    Scan {
        /// Paths to scan. Defaults to current directory.
        #[arg(short, long)]
        paths: Option<Vec<PathBuf>>,

        /// Glob patterns for entries to exclude.
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Disable default exclusion of `.` and `_` prefixed entries.
        #[arg(long)]
        no_default_excludes: bool,
    },

    /// Print the replacement rule table.
    Rules,
}
