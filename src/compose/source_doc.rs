use anyhow::{Result, anyhow};
use lopdf::{Document, ObjectId};
use std::path::Path;

use super::embed::media_box_of;

// @module: Read-only view of the source paper PDF

/// Bounding rectangle of a source page, in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRect {
    /// Page box width
    pub width: f32,
    /// Page box height
    pub height: f32,
}

/// An opened source paper.
///
/// Immutable once opened; the composer consumes it when embedding its pages
/// into the output document.
pub struct SourceDocument {
    doc: Document,
    page_ids: Vec<ObjectId>,
}

impl SourceDocument {
    /// Open a source PDF and index its pages.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let doc = Document::load(path)
            .map_err(|e| anyhow!("Failed to load PDF {:?}: {}", path, e))?;

        if doc.is_encrypted() {
            return Err(anyhow!("Encrypted PDF is not supported: {:?}", path));
        }

        let page_ids: Vec<ObjectId> = doc.get_pages().values().copied().collect();
        if page_ids.is_empty() {
            return Err(anyhow!("PDF has no pages: {:?}", path));
        }

        Ok(SourceDocument { doc, page_ids })
    }

    /// Number of pages in the document
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Bounding rectangle of a page (0-indexed)
    pub fn page_rect(&self, index: usize) -> Result<PageRect> {
        let page_id = self
            .page_ids
            .get(index)
            .ok_or_else(|| anyhow!("Page index {} out of range", index))?;

        let media_box = media_box_of(&self.doc, *page_id);
        Ok(PageRect {
            width: media_box[2] - media_box[0],
            height: media_box[3] - media_box[1],
        })
    }

    /// Hand the underlying document to the composer for embedding
    pub(crate) fn into_document(self) -> Document {
        self.doc
    }
}
