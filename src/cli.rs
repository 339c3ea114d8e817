// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There are no subcommands: the tool takes one path (a markdown file or a
// directory of them) and a handful of flags that shape the run.
// =============================================================================

use std::path::PathBuf;

use clap::Parser;

use crate::config::{DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
#[derive(Parser, Debug)]
#[command(
    name = "doc-link-guardian",
    version,
    about = "Validate the links inside a tree of markdown documentation",
    long_about = "doc-link-guardian finds every [text](url) link in your markdown files, \
                  checks that internal links point at files that exist and, with --strict, \
                  probes external URLs. Exit code 0 = all good, 1 = broken links, 2 = bad path.",
    after_help = "Examples:\n  doc-link-guardian docs/\n  doc-link-guardian docs/ --strict\n  doc-link-guardian README.md --json"
)]
pub struct Cli {
    /// Path to a markdown file or a directory of markdown files
    ///
    /// This is a positional argument (required, no flag needed)
    pub path: PathBuf,

    /// Check external URLs over the network (slower)
    #[arg(long)]
    pub strict: bool,

    /// Attempt to fix common issues (reserved, currently reports only)
    #[arg(long)]
    pub fix: bool,

    /// Output results in JSON format instead of the text report
    #[arg(long)]
    pub json: bool,

    /// Timeout in seconds for each external probe
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Maximum number of external probes running at the same time
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why PathBuf instead of String for the path?
//    - PathBuf is the owned path type; it handles non-UTF-8 paths properly
//    - clap knows how to parse it directly from the argument
//
// 2. What does ArgAction::Count do?
//    - Each -v increments the counter, so -vv gives verbose = 2
// -----------------------------------------------------------------------------
