// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - link: the Link / LinkKind / ValidationResult types and the classifier
// - markdown: Extracts links from markdown text
// - path: Resolves Internal links to files on disk
// - http: Probes External links over the network (strict mode)
//
// Nothing in here prints to the console. Verdicts are returned as values and
// the report module decides how to show them.
// =============================================================================

mod http;
mod link;
mod markdown;
mod path;

pub use http::ExternalChecker;
pub use link::{Link, LinkKind, LinkStatus, ValidationResult};
pub use markdown::extract_markdown_links;
pub use path::{normalize_lexically, PathResolver};
