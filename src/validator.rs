// src/validator.rs
// =============================================================================
// This module ties everything together for one run.
//
// How it works:
// 1. Open the documentation tree (fails early if the root does not exist)
// 2. Find the markdown files, sorted by path
// 3. For each file: read it, extract links, classify them, and resolve the
//    local ones (Internal / Anchor / Mailto) straight away
// 4. In strict mode, probe every External link of every file concurrently
//    and slot the results back into their places
// 5. Hand the finished FileReports to the ReportAggregator, in file order
//
// Local links never wait on the network: step 3 finishes for all files before
// the first probe is awaited.
// =============================================================================

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::checker::{
    extract_markdown_links, ExternalChecker, Link, LinkKind, PathResolver, ValidationResult,
};
use crate::config::ValidatorConfig;
use crate::discover::{DocTree, MarkdownFile};
use crate::error::ValidateError;
use crate::report::{FileReport, LinkReport, ReportAggregator, Reporter, RunReport};

/// Position of a link waiting for an external probe: (file index, link index).
type PendingProbe = (usize, usize);

/// Validates every link in a documentation tree.
#[derive(Debug)]
pub struct LinkValidator {
    tree: DocTree,
    resolver: PathResolver,
    checker: Option<ExternalChecker>,
    config: ValidatorConfig,
}

impl LinkValidator {
    /// Prepares a run. Returns `PathNotFound` before anything is read if the
    /// root does not exist.
    pub fn new(root: &Path, config: ValidatorConfig) -> Result<Self, ValidateError> {
        let tree = DocTree::open(root)?;
        let resolver = PathResolver::new(tree.project_root());
        let checker = if config.strict {
            Some(ExternalChecker::new(config.timeout, config.concurrency)?)
        } else {
            None
        };

        Ok(Self {
            tree,
            resolver,
            checker,
            config,
        })
    }

    pub fn tree(&self) -> &DocTree {
        &self.tree
    }

    /// Validates all markdown files and returns the finished report.
    ///
    /// Per-file and per-link failures end up inside the report; this never
    /// fails once the validator has been built.
    pub async fn run(&self, reporter: &mut dyn Reporter) -> RunReport {
        if self.config.fix {
            reporter.warning("Auto-fix is not available; links will only be reported");
        }

        let files = self.tree.markdown_files();
        if files.is_empty() {
            reporter.warning("No markdown files found");
            return ReportAggregator::new().finish();
        }

        reporter.info(&format!("Found {} markdown files", files.len()));

        let mut reports = Vec::with_capacity(files.len());
        let mut pending: Vec<PendingProbe> = Vec::new();
        let mut urls = Vec::new();

        for (file_index, file) in files.into_iter().enumerate() {
            reporter.info(&format!("Validating: {}", file.relative.display()));
            let report = self.validate_file(file);

            for (link_index, entry) in report.links.iter().enumerate() {
                if self.needs_probe(&entry.link) {
                    pending.push((file_index, link_index));
                    urls.push(entry.link.url.clone());
                }
            }
            reports.push(report);
        }

        if let Some(checker) = &self.checker {
            if !urls.is_empty() {
                info!(count = urls.len(), "probing external links");
                let results = checker.check_all(urls).await;
                for ((file_index, link_index), result) in pending.into_iter().zip(results) {
                    reports[file_index].links[link_index].result = result;
                }
            }
        }

        let mut aggregator = ReportAggregator::new();
        for report in reports {
            aggregator.push(report);
        }
        aggregator.finish()
    }

    /// Reads one file and evaluates its local links.
    ///
    /// External links that still need a probe get a placeholder result which
    /// `run` overwrites.
    fn validate_file(&self, file: MarkdownFile) -> FileReport {
        let content = match read_markdown(&file) {
            Ok(content) => content,
            Err(err) => {
                warn!(path = %file.path.display(), error = %err, "skipping unreadable file");
                return FileReport::unreadable(file, &err);
            }
        };

        let mut report = FileReport::new(file);
        for link in extract_markdown_links(&content) {
            let result = self.evaluate_local(&report.file, &link);
            report.links.push(LinkReport { link, result });
        }

        debug!(
            file = %report.file.relative.display(),
            links = report.links.len(),
            "file evaluated"
        );
        report
    }

    fn evaluate_local(&self, file: &MarkdownFile, link: &Link) -> ValidationResult {
        match LinkKind::classify(&link.url) {
            LinkKind::Anchor => ValidationResult::ok(LinkKind::Anchor),
            LinkKind::Mailto => ValidationResult::ok(LinkKind::Mailto),
            LinkKind::Internal => self.resolver.resolve(file, &link.url),
            LinkKind::External if self.checker.is_some() => {
                ValidationResult::check_failed(LinkKind::External, "External link not probed")
            }
            // Non-strict mode: no network access at all
            LinkKind::External => ValidationResult::ok(LinkKind::External),
        }
    }

    fn needs_probe(&self, link: &Link) -> bool {
        self.checker.is_some() && LinkKind::classify(&link.url) == LinkKind::External
    }
}

fn read_markdown(file: &MarkdownFile) -> Result<String, ValidateError> {
    fs::read_to_string(&file.path).map_err(|source| ValidateError::FileUnreadable {
        path: file.path.clone(),
        source,
    })
}
