// src/checker/markdown.rs
// =============================================================================
// This module extracts links from Markdown text.
//
// We do not parse markdown into a tree. Links are found with a regular
// expression, one line at a time, so every link gets an exact line number:
//
//   [display text](url)
//
// The text may not contain `]` and the url may not contain `)`, which keeps
// each match short and lets several links on one line be found separately.
// =============================================================================

use std::sync::LazyLock;

use regex::Regex;

use super::link::Link;

static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // The pattern is a constant, so a failure here is a programmer error
    Regex::new(r"\[(?P<text>[^\]]+)\]\((?P<url>[^)]+)\)").expect("link pattern is valid")
});

// Extracts all links from Markdown text, in the order they appear
//
// Example input:
//   "See [Rust](https://www.rust-lang.org) and [docs](./docs/README.md)"
//
// Example output (both on line 1):
//   Link { text: "Rust", url: "https://www.rust-lang.org" }
//   Link { text: "docs", url: "./docs/README.md" }
pub fn extract_markdown_links(markdown: &str) -> Vec<Link> {
    let mut links = Vec::new();

    for (index, line) in markdown.lines().enumerate() {
        for captures in LINK_PATTERN.captures_iter(line) {
            links.push(Link {
                line: index + 1,
                text: captures["text"].to_string(),
                url: captures["url"].to_string(),
            });
        }
    }

    links
}
