use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;

// @module: Workspace directory layout and paper discovery

/// Typed view of a paper workspace directory.
///
/// Layout:
/// - `papers/<name>.pdf` — source PDFs
/// - `translations/<name>_p*.md` — page-by-page translation fragments
/// - `<name>_annotated.md` — condensed summary source
/// - `extracted/<name>_pages.json` — page text dumps (written by the
///   extraction script, not read here)
/// - `output/` — generated artifacts
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Create a workspace view rooted at the given directory
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Workspace {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Workspace root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the source PDFs
    pub fn papers_dir(&self) -> PathBuf {
        self.root.join("papers")
    }

    /// Directory holding translation fragment files
    pub fn translations_dir(&self) -> PathBuf {
        self.root.join("translations")
    }

    /// Directory for generated artifacts
    pub fn output_dir(&self) -> PathBuf {
        self.root.join("output")
    }

    /// Path of a paper's source PDF
    pub fn paper_path(&self, name: &str) -> PathBuf {
        self.papers_dir().join(format!("{}.pdf", name))
    }

    /// Path of a paper's condensed summary markdown
    pub fn annotated_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}_annotated.md", name))
    }

    /// Path of the page-text extraction artifact for a paper
    pub fn extracted_pages_path(&self, name: &str) -> PathBuf {
        self.root.join("extracted").join(format!("{}_pages.json", name))
    }

    /// Output path of the side-by-side spread PDF
    pub fn dual_output_path(&self, name: &str) -> PathBuf {
        self.output_dir().join(format!("{}_dual.pdf", name))
    }

    /// Output path of the summary PDF
    pub fn summary_output_path(&self, name: &str) -> PathBuf {
        self.output_dir().join(format!("{}_summary.pdf", name))
    }

    /// List the paper names available under `papers/`, sorted by name.
    ///
    /// A missing `papers/` directory yields an empty list rather than an error
    /// so that a bare workspace is just "nothing to do".
    pub fn discover_papers(&self) -> Result<Vec<String>> {
        let papers_dir = self.papers_dir();
        if !FileManager::dir_exists(&papers_dir) {
            return Ok(Vec::new());
        }

        let mut names: Vec<String> = FileManager::find_files(&papers_dir, "pdf")?
            .iter()
            .filter_map(|path| path.file_stem())
            .map(|stem| stem.to_string_lossy().to_string())
            .collect();

        names.sort();
        Ok(names)
    }

    /// List the translation fragment files for a paper, sorted by filename.
    ///
    /// Matches `translations/<name>_p*.md`. Sorted order matters: the merger
    /// applies fragments in this order and the last writer for a page wins.
    pub fn fragment_files(&self, name: &str) -> Result<Vec<PathBuf>> {
        let dir = self.translations_dir();
        if !FileManager::dir_exists(&dir) {
            return Ok(Vec::new());
        }

        let prefix = format!("{}_p", name);
        let mut files = Vec::new();
        for entry in fs::read_dir(&dir)
            .with_context(|| format!("Failed to read directory: {:?}", dir))?
        {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let file_name = match path.file_name() {
                Some(n) => n.to_string_lossy().to_string(),
                None => continue,
            };

            if file_name.starts_with(&prefix) && file_name.ends_with(".md") {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}
