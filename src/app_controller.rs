use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::time::Duration;

use crate::app_config::Config;
use crate::compose::{SourceDocument, SpreadComposer};
use crate::file_utils::FileManager;
use crate::rendering::{PageRenderer, RenderSession};
use crate::translation_merger::merge_fragment_files;
use crate::workspace::Workspace;

// @module: Application controller for paper processing

/// What to generate for each paper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Side-by-side spread PDFs only
    Dual,
    /// Summary PDFs only
    Summary,
    /// Both
    All,
}

impl Mode {
    fn includes_dual(self) -> bool {
        matches!(self, Mode::Dual | Mode::All)
    }

    fn includes_summary(self) -> bool {
        matches!(self, Mode::Summary | Mode::All)
    }
}

/// Main application controller for batch paper processing
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Process the workspace: every discovered paper, or just `only`.
    ///
    /// One browser session serves the whole batch; it is released when this
    /// method returns. A failure in one document is logged and the batch
    /// moves on to the next.
    pub fn run(&self, workspace: &Workspace, mode: Mode, only: Option<&str>) -> Result<()> {
        let papers = match only {
            Some(name) => vec![name.to_string()],
            None => workspace.discover_papers()?,
        };

        if papers.is_empty() {
            warn!("No papers found under {:?}", workspace.papers_dir());
            return Ok(());
        }

        FileManager::ensure_dir(workspace.output_dir())?;

        let session = RenderSession::start(&self.config.render)
            .context("Failed to start the render session")?;
        let renderer = PageRenderer::new(&session);

        if mode.includes_dual() {
            info!("Generating spread PDFs for {} paper(s)", papers.len());
            for name in &papers {
                let progress = Self::paper_spinner(name);
                if let Err(e) = self.generate_dual(workspace, name, &renderer) {
                    error!("{}: {:#}", name, e);
                }
                progress.finish_and_clear();
            }
        }

        if mode.includes_summary() {
            info!("Generating summary PDFs for {} paper(s)", papers.len());
            for name in &papers {
                if let Err(e) = self.generate_summary(workspace, name, &renderer) {
                    error!("{}: {:#}", name, e);
                }
            }
        }

        info!("Done. Output: {:?}", workspace.output_dir());
        Ok(())
    }

    /// Compose the side-by-side spread PDF for one paper.
    ///
    /// Skips (without error) when the source PDF or the translation
    /// fragments are missing.
    fn generate_dual(&self, workspace: &Workspace, name: &str, renderer: &PageRenderer) -> Result<()> {
        let pdf_path = workspace.paper_path(name);
        if !FileManager::file_exists(&pdf_path) {
            warn!("Skipping {}: no source PDF", name);
            return Ok(());
        }

        let fragment_files = workspace.fragment_files(name)?;
        if fragment_files.is_empty() {
            warn!("Skipping {}: no translation files", name);
            return Ok(());
        }

        let translations = merge_fragment_files(&fragment_files)
            .with_context(|| format!("Failed to merge translations for {}", name))?;
        if translations.is_empty() {
            warn!("Skipping {}: translation files contain no page markers", name);
            return Ok(());
        }

        let source = SourceDocument::open(&pdf_path)?;
        info!(
            "{}: {} source pages, {} translated",
            name,
            source.page_count(),
            translations.len()
        );

        let composer = SpreadComposer::new(self.config.page_width, self.config.page_height);
        let output_path = workspace.dual_output_path(name);
        let stats = composer.compose_to_file(source, &translations, renderer, &output_path)?;

        info!(
            "{}: wrote {:?} ({} spread pages, {} overflow)",
            name, output_path, stats.spread_pages, stats.overflow_pages
        );
        Ok(())
    }

    /// Render the condensed summary markdown for one paper, if present.
    fn generate_summary(&self, workspace: &Workspace, name: &str, renderer: &PageRenderer) -> Result<()> {
        let md_path = workspace.annotated_path(name);
        if !FileManager::file_exists(&md_path) {
            debug!("Skipping summary for {}: no annotated markdown", name);
            return Ok(());
        }

        let md_text = FileManager::read_to_string(&md_path)?;
        let pdf_bytes = renderer
            .render_document(&md_text)
            .with_context(|| format!("Failed to render summary for {}", name))?;

        let output_path = workspace.summary_output_path(name);
        FileManager::write_bytes(&output_path, &pdf_bytes)?;

        info!("{}: wrote {:?}", name, output_path);
        Ok(())
    }

    fn paper_spinner(name: &str) -> ProgressBar {
        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        progress.set_message(format!("Composing {}", name));
        progress.enable_steady_tick(Duration::from_millis(120));
        progress
    }
}
