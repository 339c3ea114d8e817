// src/lib.rs
// =============================================================================
// doc-link-guardian: validate the links inside a tree of markdown documents.
//
// The flow for one run:
//
//   discover (markdown files) -> checker::markdown (extract links)
//     -> checker::link (classify) -> checker::path / checker::http (verdicts)
//     -> report (aggregate + render)
//
// validator::LinkValidator drives it; main.rs only parses arguments, sets up
// logging and picks a reporter.
// =============================================================================

pub mod checker;
pub mod cli;
pub mod config;
pub mod discover;
pub mod error;
pub mod report;
pub mod validator;

pub use checker::{Link, LinkKind, LinkStatus, ValidationResult};
pub use config::ValidatorConfig;
pub use discover::{DocTree, MarkdownFile};
pub use error::ValidateError;
pub use report::{
    FileReport, JsonReporter, Reporter, RunReport, Summary, TerminalReporter, EXIT_BROKEN,
    EXIT_OK, EXIT_USAGE,
};
pub use validator::LinkValidator;
