// src/report/terminal.rs
// =============================================================================
// Human-readable report for the terminal.
//
// Each file gets a ✓ when all its links are fine, otherwise a ✗ followed by
// one entry per problem: line number, cause, and the link as written. A
// summary block closes the report.
//
// Colours are plain ANSI escapes and are only used when writing to a TTY.
// =============================================================================

use std::io::{self, IsTerminal, Stdout, Write};

use super::{FileReport, Reporter, RunReport};
use crate::checker::LinkStatus;

const RED: &str = "\x1b[91m";
const GREEN: &str = "\x1b[92m";
const YELLOW: &str = "\x1b[93m";
const BLUE: &str = "\x1b[94m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

const RULE_WIDTH: usize = 70;

/// Writes the text report to any writer.
pub struct TerminalReporter<W: Write> {
    out: W,
    color: bool,
}

impl TerminalReporter<Stdout> {
    /// Reporter on stdout, coloured if stdout is a terminal.
    pub fn stdout() -> Self {
        let out = io::stdout();
        let color = out.is_terminal();
        Self::new(out, color)
    }
}

impl<W: Write> TerminalReporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    // Progress messages have nowhere better to go if stdout is gone
    fn line(&mut self, marker: &str, code: &str, message: &str) {
        let marker = self.paint(code, marker);
        let _ = writeln!(self.out, "{marker} {message}");
    }

    fn heading(&mut self, title: &str) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        let title = self.paint(BOLD, title);
        writeln!(self.out, "\n{rule}")?;
        writeln!(self.out, "{title}")?;
        writeln!(self.out, "{rule}")
    }

    fn render_file(&mut self, report: &FileReport) -> io::Result<()> {
        let name = report.file.relative.display().to_string();

        if report.is_clean() {
            let marker = self.paint(GREEN, "✓");
            writeln!(self.out, "{marker} {name}")?;
            return Ok(());
        }

        let marker = self.paint(RED, "✗");
        if let Some(cause) = &report.read_error {
            writeln!(self.out, "{marker} {name}: {cause}")?;
            return Ok(());
        }

        writeln!(self.out, "{marker} {name}:")?;
        for entry in report.problems() {
            let marker = match entry.result.status {
                LinkStatus::CheckFailed => self.paint(YELLOW, "⚠"),
                _ => self.paint(RED, "✗"),
            };
            let detail = entry.result.detail.as_deref().unwrap_or("invalid link");
            writeln!(self.out, "  {marker} Line {}: {detail}", entry.link.line)?;
            writeln!(self.out, "    Link: [{}]({})", entry.link.text, entry.link.url)?;
        }
        Ok(())
    }
}

impl<W: Write> Reporter for TerminalReporter<W> {
    fn info(&mut self, message: &str) {
        self.line("ℹ", BLUE, message);
    }

    fn success(&mut self, message: &str) {
        self.line("✓", GREEN, message);
    }

    fn warning(&mut self, message: &str) {
        self.line("⚠", YELLOW, message);
    }

    fn error(&mut self, message: &str) {
        self.line("✗", RED, message);
    }

    fn render(&mut self, report: &RunReport) -> io::Result<()> {
        // Nothing was validated; the warning about it has already been shown
        if report.files.is_empty() {
            return Ok(());
        }

        self.heading("Link Validation Report")?;
        for file in &report.files {
            self.render_file(file)?;
        }

        let summary = &report.summary;
        self.heading("Summary")?;
        writeln!(self.out, "Files validated: {}", summary.files)?;
        writeln!(self.out, "Links checked: {}", summary.links)?;
        writeln!(self.out, "Errors found: {}", summary.errors())?;
        writeln!(self.out, "Warnings: {}", summary.warnings())?;
        writeln!(self.out, "Issues fixed: {}", summary.fixed)?;

        if summary.errors() == 0 && summary.warnings() == 0 {
            self.success("All links validated successfully!");
        }
        if summary.errors() > 0 {
            self.error(&format!("Found {} errors", summary.errors()));
        }
        if summary.warnings() > 0 {
            self.warning(&format!("Could not verify {} links", summary.warnings()));
        }

        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{Link, LinkKind, ValidationResult};
    use crate::discover::MarkdownFile;
    use crate::error::ValidateError;
    use crate::report::{LinkReport, ReportAggregator};
    use std::path::PathBuf;

    fn file(name: &str) -> MarkdownFile {
        MarkdownFile {
            path: PathBuf::from("/proj/docs").join(name),
            relative: PathBuf::from(name),
        }
    }

    fn render(report: &RunReport) -> String {
        let mut reporter = TerminalReporter::new(Vec::new(), false);
        reporter.render(report).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_messages_without_color() {
        let mut reporter = TerminalReporter::new(Vec::new(), false);
        reporter.info("Found 2 markdown files");
        reporter.warning("No markdown files found");
        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(output, "ℹ Found 2 markdown files\n⚠ No markdown files found\n");
    }

    #[test]
    fn test_messages_with_color() {
        let mut reporter = TerminalReporter::new(Vec::new(), true);
        reporter.error("boom");
        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(output, "\x1b[91m✗\x1b[0m boom\n");
    }

    #[test]
    fn test_clean_report() {
        let mut aggregator = ReportAggregator::new();
        aggregator.push(FileReport::new(file("a.md")));
        let output = render(&aggregator.finish());

        assert!(output.contains("Link Validation Report"));
        assert!(output.contains("✓ a.md"));
        assert!(output.contains("Files validated: 1"));
        assert!(output.contains("Errors found: 0"));
        assert!(output.contains("Issues fixed: 0"));
        assert!(output.contains("All links validated successfully!"));
    }

    #[test]
    fn test_broken_link_lines() {
        let mut report = FileReport::new(file("a.md"));
        report.links.push(LinkReport {
            link: Link {
                line: 7,
                text: "C".to_string(),
                url: "../missing.md".to_string(),
            },
            result: ValidationResult::broken(LinkKind::Internal, "File not found: /proj/missing.md"),
        });
        let mut aggregator = ReportAggregator::new();
        aggregator.push(report);
        let error = ValidateError::FileUnreadable {
            path: PathBuf::from("/proj/docs/b.md"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        aggregator.push(FileReport::unreadable(file("b.md"), &error));
        let output = render(&aggregator.finish());

        assert!(output.contains("✗ a.md:"));
        assert!(output.contains("  ✗ Line 7: File not found: /proj/missing.md"));
        assert!(output.contains("    Link: [C](../missing.md)"));
        assert!(output.contains("✗ b.md: Cannot read file: denied"));
        assert!(output.contains("Errors found: 2"));
        assert!(output.contains("Found 2 errors"));
    }

    #[test]
    fn test_unreadable_file_alone_is_not_called_a_broken_link() {
        let error = ValidateError::FileUnreadable {
            path: PathBuf::from("/proj/docs/a.md"),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "invalid UTF-8"),
        };
        let mut aggregator = ReportAggregator::new();
        aggregator.push(FileReport::unreadable(file("a.md"), &error));
        let output = render(&aggregator.finish());

        assert!(output.contains("Found 1 errors"));
        assert!(!output.contains("broken links"));
    }

    #[test]
    fn test_empty_run_renders_nothing() {
        assert_eq!(render(&ReportAggregator::new().finish()), "");
    }
}
