// src/checker/path.rs
// =============================================================================
// This module resolves Internal links to files on disk.
//
// How a link is resolved depends on how it is written:
//
//   /guide/intro.md    -> relative to the project root (parent of the docs root)
//   ./intro.md         -> relative to the directory of the linking file
//   ../intro.md        -> same, then `..` segments are collapsed lexically
//   intro.md           -> same as ./intro.md
//
// Any `#fragment` is dropped first; we only check that the file exists.
//
// If the resolved file is missing, the candidate is re-rooted under the
// project root and checked once more. Only when both are missing is the link
// reported as broken.
// =============================================================================

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use super::link::{LinkKind, ValidationResult};
use crate::discover::MarkdownFile;

/// Resolves Internal links against a fixed project root.
///
/// Resolution depends only on the source file, the raw URL and the project
/// root, so results never depend on which file was validated first.
#[derive(Debug, Clone)]
pub struct PathResolver {
    project_root: PathBuf,
}

impl PathResolver {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    /// Validates an Internal link found in `source`.
    pub fn resolve(&self, source: &MarkdownFile, url: &str) -> ValidationResult {
        let candidate = self.candidate(source.dir(), url);

        if candidate.exists() {
            debug!(url, target = %candidate.display(), "internal link resolved");
            return ValidationResult::ok(LinkKind::Internal).with_target(candidate);
        }

        let alternate = self.fallback_path(&candidate);
        if alternate != candidate && alternate.exists() {
            debug!(
                url,
                candidate = %candidate.display(),
                target = %alternate.display(),
                "internal link resolved via project root fallback"
            );
            return ValidationResult::ok(LinkKind::Internal).with_target(alternate);
        }

        debug!(url, candidate = %candidate.display(), "internal link target missing");
        ValidationResult::broken(
            LinkKind::Internal,
            format!("File not found: {}", candidate.display()),
        )
        .with_target(candidate)
    }

    /// Computes the filesystem path a link points at, without touching the disk.
    pub fn candidate(&self, source_dir: &Path, url: &str) -> PathBuf {
        let path = strip_fragment(url);

        if let Some(rest) = path.strip_prefix('/') {
            self.project_root.join(rest.trim_start_matches('/'))
        } else if path.starts_with("../") {
            normalize_lexically(&source_dir.join(path))
        } else {
            // "./x" and plain "x" are the same thing
            strip_cur_dir(&source_dir.join(path))
        }
    }

    /// Reinterprets a candidate as if it were relative to the project root.
    ///
    /// Candidates already inside the project root map onto themselves; anything
    /// else has its root stripped and is joined under the project root.
    pub fn fallback_path(&self, candidate: &Path) -> PathBuf {
        let relative: PathBuf = match candidate.strip_prefix(&self.project_root) {
            Ok(rest) => rest.to_path_buf(),
            Err(_) => candidate
                .components()
                .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir))
                .collect(),
        };
        self.project_root.join(relative)
    }
}

/// Drops a trailing `#fragment`, if any.
fn strip_fragment(url: &str) -> &str {
    match url.find('#') {
        Some(index) => &url[..index],
        None => url,
    }
}

fn strip_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Collapses `.` and `..` segments without consulting the filesystem.
///
/// Symlinks are not followed. `..` at the root stays at the root.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    out.into_iter().collect()
}
