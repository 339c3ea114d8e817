// src/checker/link.rs
// =============================================================================
// The core data types of link checking, plus the classifier.
//
// A Link is what we scanned out of a file. Its LinkKind decides how it gets
// checked, and a ValidationResult is the verdict for it.
// =============================================================================

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A `[text](url)` occurrence in a markdown file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// 1-based line number of the link.
    pub line: usize,
    /// The bracketed display text.
    pub text: String,
    /// The URL exactly as written between the parentheses.
    pub url: String,
}

/// What kind of target a link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// `#section`, a fragment in the same document.
    Anchor,
    /// `mailto:someone@example.com`
    Mailto,
    /// `http://` or `https://`
    External,
    /// Anything else: a path to another file in the tree.
    Internal,
}

impl LinkKind {
    /// Classifies a raw URL. The order of the checks matters.
    pub fn classify(url: &str) -> Self {
        if url.starts_with("mailto:") {
            LinkKind::Mailto
        } else if url.starts_with('#') {
            LinkKind::Anchor
        } else if url.starts_with("http://") || url.starts_with("https://") {
            LinkKind::External
        } else {
            LinkKind::Internal
        }
    }
}

/// The verdict for a single link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    /// The target exists (or was not checked, e.g. anchors).
    Ok,
    /// The target is definitely missing or answered with an error status.
    Broken,
    /// We could not find out (network failure, invalid URL).
    CheckFailed,
}

/// Result of validating one link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub kind: LinkKind,
    pub status: LinkStatus,
    /// Filesystem target an Internal link resolved to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<PathBuf>,
    /// Extra details, e.g. "HTTP 404" or "File not found: ...".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ValidationResult {
    pub fn ok(kind: LinkKind) -> Self {
        Self {
            kind,
            status: LinkStatus::Ok,
            target: None,
            detail: None,
        }
    }

    pub fn broken(kind: LinkKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            status: LinkStatus::Broken,
            target: None,
            detail: Some(detail.into()),
        }
    }

    pub fn check_failed(kind: LinkKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            status: LinkStatus::CheckFailed,
            target: None,
            detail: Some(detail.into()),
        }
    }

    pub fn with_target(mut self, target: PathBuf) -> Self {
        self.target = Some(target);
        self
    }

    pub fn is_ok(&self) -> bool {
        self.status == LinkStatus::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_each_kind() {
        assert_eq!(LinkKind::classify("mailto:a@b.c"), LinkKind::Mailto);
        assert_eq!(LinkKind::classify("#intro"), LinkKind::Anchor);
        assert_eq!(LinkKind::classify("https://example.com"), LinkKind::External);
        assert_eq!(LinkKind::classify("http://example.com"), LinkKind::External);
        assert_eq!(LinkKind::classify("./a.md"), LinkKind::Internal);
        assert_eq!(LinkKind::classify("guide.md#setup"), LinkKind::Internal);
    }

    #[test]
    fn test_classify_other_schemes_are_internal() {
        // Only http(s) is external; ftp and friends fall through to paths
        assert_eq!(LinkKind::classify("ftp://example.com"), LinkKind::Internal);
        assert_eq!(LinkKind::classify("HTTPS://example.com"), LinkKind::Internal);
    }

    #[test]
    fn test_result_serializes_without_empty_fields() {
        let json = serde_json::to_value(ValidationResult::ok(LinkKind::Anchor)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "anchor", "status": "ok"}));

        let json = serde_json::to_value(ValidationResult::broken(LinkKind::External, "HTTP 404")).unwrap();
        assert_eq!(json["status"], "broken");
        assert_eq!(json["detail"], "HTTP 404");
    }
}
