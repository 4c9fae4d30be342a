use anyhow::Result;

use super::browser::RenderSession;
use super::html::{markdown_to_html, wrap_in_page_template};

// @module: Renderer facade for translated pages and summary documents

/// Seam between the composer and the rendering pipeline.
///
/// The composer only needs "markdown in, PDF bytes out"; tests substitute a
/// mock implementation that fabricates multi-page PDFs without a browser.
pub trait TranslationRenderer {
    /// Render one page's markdown to a standalone PDF.
    ///
    /// The result has at least one page; the browser paginates automatically
    /// when the content overflows the page height.
    fn render_page(&self, md_text: &str) -> Result<Vec<u8>>;
}

/// Renders markdown through the page template and the shared browser session.
pub struct PageRenderer<'a> {
    session: &'a RenderSession,
}

impl<'a> PageRenderer<'a> {
    /// Create a renderer bound to a running browser session
    pub fn new(session: &'a RenderSession) -> Self {
        PageRenderer { session }
    }

    /// Render a whole markdown document to a PDF (summary mode).
    ///
    /// Same mechanism as page rendering; the core imposes no page-splitting
    /// semantics on the result.
    pub fn render_document(&self, md_text: &str) -> Result<Vec<u8>> {
        let body = markdown_to_html(md_text);
        let page = wrap_in_page_template(&body);
        self.session.render_html(&page)
    }
}

impl TranslationRenderer for PageRenderer<'_> {
    fn render_page(&self, md_text: &str) -> Result<Vec<u8>> {
        self.render_document(md_text)
    }
}
