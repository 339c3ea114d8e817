// src/discover.rs
// =============================================================================
// This module finds the markdown files we are going to validate.
//
// The root given on the command line can be:
// - a single file: it is validated only if it has a markdown extension
// - a directory: every markdown file below it is validated, recursively
//
// Files are returned sorted by path so that reports are stable and diffable.
// =============================================================================

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::checker::normalize_lexically;
use crate::error::ValidateError;

/// File extensions treated as markdown.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// A markdown file found under the documentation root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkdownFile {
    /// Absolute path to the file.
    pub path: PathBuf,
    /// Path relative to the documentation root (used for display).
    #[serde(rename = "file")]
    pub relative: PathBuf,
}

impl MarkdownFile {
    /// The directory that relative links in this file are resolved against.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("/"))
    }
}

/// The documentation tree being validated.
///
/// `docs_root` is the directory files are discovered under (the input itself
/// when it is a directory, its parent when it is a single file).
/// `project_root` is the parent of `docs_root` and anchors `/`-style links.
#[derive(Debug, Clone)]
pub struct DocTree {
    input: PathBuf,
    docs_root: PathBuf,
    project_root: PathBuf,
}

impl DocTree {
    /// Opens a documentation tree, failing if the root does not exist.
    ///
    /// This is the pre-flight check: nothing is read before it succeeds.
    pub fn open(root: &Path) -> Result<Self, ValidateError> {
        let input = normalize_lexically(&std::path::absolute(root)?);

        if !input.exists() {
            return Err(ValidateError::PathNotFound { path: input });
        }

        let docs_root = if input.is_file() {
            input.parent().map(Path::to_path_buf).unwrap_or_else(|| input.clone())
        } else {
            input.clone()
        };
        let project_root = docs_root
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| docs_root.clone());

        debug!(
            docs_root = %docs_root.display(),
            project_root = %project_root.display(),
            "opened documentation tree"
        );

        Ok(Self {
            input,
            docs_root,
            project_root,
        })
    }

    pub fn docs_root(&self) -> &Path {
        &self.docs_root
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Lists every markdown file in the tree, sorted by path.
    pub fn markdown_files(&self) -> Vec<MarkdownFile> {
        let mut paths = Vec::new();

        if self.input.is_file() {
            if is_markdown(&self.input) {
                paths.push(self.input.clone());
            }
        } else {
            for entry in WalkDir::new(&self.input) {
                // Unreadable directories are skipped, not fatal
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!(error = %e, "skipping unreadable directory entry");
                        continue;
                    }
                };

                // path().is_file() follows symlinked files; symlinked
                // directories are still not descended into
                if entry.path().is_file() && is_markdown(entry.path()) {
                    paths.push(entry.into_path());
                }
            }
        }

        paths.sort();

        paths
            .into_iter()
            .map(|path| {
                let relative = path
                    .strip_prefix(&self.docs_root)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| path.clone());
                MarkdownFile { path, relative }
            })
            .collect()
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "# doc\n").unwrap();
    }

    #[test]
    fn test_missing_root_is_path_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = DocTree::open(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, ValidateError::PathNotFound { .. }));
    }

    #[test]
    fn test_directory_is_walked_recursively_and_sorted() {
        let tmp = TempDir::new().unwrap();
        let docs = tmp.path().join("docs");
        touch(&docs, "b.md");
        touch(&docs, "a.md");
        touch(&docs, "sub/c.md");
        touch(&docs, "notes.txt");

        let tree = DocTree::open(&docs).unwrap();
        let rel: Vec<_> = tree.markdown_files().into_iter().map(|f| f.relative).collect();
        assert_eq!(
            rel,
            vec![PathBuf::from("a.md"), PathBuf::from("b.md"), PathBuf::from("sub/c.md")]
        );
        assert_eq!(tree.project_root(), normalize_lexically(&std::path::absolute(tmp.path()).unwrap()));
    }

    #[test]
    fn test_single_markdown_file() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "docs/a.md");

        let tree = DocTree::open(&tmp.path().join("docs/a.md")).unwrap();
        let files = tree.markdown_files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative, PathBuf::from("a.md"));
        assert!(tree.docs_root().ends_with("docs"));
    }

    #[test]
    fn test_single_non_markdown_file_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "docs/a.txt");

        let tree = DocTree::open(&tmp.path().join("docs/a.txt")).unwrap();
        assert!(tree.markdown_files().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_markdown_file_is_found() {
        let tmp = TempDir::new().unwrap();
        let docs = tmp.path().join("docs");
        touch(&docs, "a.md");
        touch(tmp.path(), "real.md");
        std::os::unix::fs::symlink(tmp.path().join("real.md"), docs.join("linked.md")).unwrap();

        // A symlinked directory is listed but not walked
        touch(tmp.path(), "elsewhere/hidden.md");
        std::os::unix::fs::symlink(tmp.path().join("elsewhere"), docs.join("elsewhere")).unwrap();

        let tree = DocTree::open(&docs).unwrap();
        let rel: Vec<_> = tree.markdown_files().into_iter().map(|f| f.relative).collect();
        assert_eq!(rel, vec![PathBuf::from("a.md"), PathBuf::from("linked.md")]);
    }

    #[test]
    fn test_empty_directory_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        let tree = DocTree::open(tmp.path()).unwrap();
        assert!(tree.markdown_files().is_empty());
    }
}
