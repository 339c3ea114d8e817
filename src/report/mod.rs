// src/report/mod.rs
// =============================================================================
// This module collects per-file results and turns them into a report.
//
// - FileReport: every link of one file together with its verdict
// - ReportAggregator: gathers FileReports in discovery order and keeps the
//   summary counters
// - Reporter: the output abstraction. The validator talks to it for progress
//   messages, main.rs hands it the final RunReport
//
// Two reporters exist: a human-readable terminal one and a JSON one.
// =============================================================================

mod json;
mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use serde::Serialize;
use tracing::warn;

use crate::checker::{Link, LinkStatus, ValidationResult};
use crate::discover::MarkdownFile;
use crate::error::ValidateError;

/// Exit code: every link is valid (or there was nothing to check).
pub const EXIT_OK: i32 = 0;
/// Exit code: at least one link is broken or could not be verified.
pub const EXIT_BROKEN: i32 = 1;
/// Exit code: the invocation was unusable (e.g. the path does not exist).
pub const EXIT_USAGE: i32 = 2;

/// Where user-facing output goes.
///
/// The validation core only ever calls these methods; it never writes to the
/// console itself.
pub trait Reporter {
    fn info(&mut self, message: &str);
    fn success(&mut self, message: &str);
    fn warning(&mut self, message: &str);
    fn error(&mut self, message: &str);

    /// Renders the final report.
    fn render(&mut self, report: &RunReport) -> std::io::Result<()>;
}

/// One link and its verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkReport {
    #[serde(flatten)]
    pub link: Link,
    #[serde(flatten)]
    pub result: ValidationResult,
}

/// Validation outcome for a single markdown file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    #[serde(flatten)]
    pub file: MarkdownFile,
    /// Set when the file could not be read; `links` is then empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_error: Option<String>,
    /// Links in extraction order.
    pub links: Vec<LinkReport>,
}

impl FileReport {
    pub fn new(file: MarkdownFile) -> Self {
        Self {
            file,
            read_error: None,
            links: Vec::new(),
        }
    }

    pub fn unreadable(file: MarkdownFile, error: &ValidateError) -> Self {
        Self {
            file,
            read_error: Some(error.to_string()),
            links: Vec::new(),
        }
    }

    /// Links whose verdict is not Ok.
    pub fn problems(&self) -> impl Iterator<Item = &LinkReport> {
        self.links.iter().filter(|entry| !entry.result.is_ok())
    }

    pub fn is_clean(&self) -> bool {
        self.read_error.is_none() && self.problems().next().is_none()
    }
}

/// Counters for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Files validated (readable or not).
    pub files: usize,
    /// Links extracted across all files.
    pub links: usize,
    pub broken: usize,
    pub check_failed: usize,
    /// Files that could not be read.
    pub unreadable: usize,
    /// Links repaired by --fix. Auto-repair is not implemented, so always 0.
    pub fixed: usize,
}

impl Summary {
    /// Definite problems: broken links plus unreadable files.
    pub fn errors(&self) -> usize {
        self.broken + self.unreadable
    }

    /// Links we could not verify.
    pub fn warnings(&self) -> usize {
        self.check_failed
    }

    pub fn exit_code(&self) -> i32 {
        if self.errors() + self.warnings() > 0 {
            EXIT_BROKEN
        } else {
            EXIT_OK
        }
    }
}

/// Everything a reporter needs to render a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    pub summary: Summary,
}

impl RunReport {
    pub fn exit_code(&self) -> i32 {
        self.summary.exit_code()
    }
}

/// Renders `report` and returns the run's exit code.
///
/// A failed write (e.g. stdout closed by `| head`) is logged; it does not
/// change the exit code.
pub fn render_and_exit_code(reporter: &mut dyn Reporter, report: &RunReport) -> i32 {
    if let Err(e) = reporter.render(report) {
        warn!(error = %e, "failed to write the report");
    }
    report.exit_code()
}

/// Accumulates FileReports in discovery order.
///
/// Counters are only touched in `push`, i.e. once a file is fully evaluated.
#[derive(Debug, Default)]
pub struct ReportAggregator {
    files: Vec<FileReport>,
    summary: Summary,
}

impl ReportAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, report: FileReport) {
        self.summary.files += 1;
        self.summary.links += report.links.len();
        if report.read_error.is_some() {
            self.summary.unreadable += 1;
        }
        for entry in &report.links {
            match entry.result.status {
                LinkStatus::Ok => {}
                LinkStatus::Broken => self.summary.broken += 1,
                LinkStatus::CheckFailed => self.summary.check_failed += 1,
            }
        }
        self.files.push(report);
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn finish(self) -> RunReport {
        RunReport {
            files: self.files,
            summary: self.summary,
        }
    }
}
