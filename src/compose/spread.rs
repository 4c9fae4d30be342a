use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use std::fmt::Write as _;
use std::path::Path;

use super::embed::{EmbeddedPage, embed_document_pages};
use super::source_doc::SourceDocument;
use crate::rendering::TranslationRenderer;
use crate::translation_merger::TranslationMap;

// @module: Spread composition state machine

// Footer label layout, measured from the spread's bottom-left corner
const FOOTER_FONT_SIZE: f32 = 7.0;
const FOOTER_INSET_X: f32 = 20.0;
const FOOTER_BASELINE_Y: f32 = 12.0;

/// Uniform scale and centering offsets that letterbox a page into a target
/// half without cropping or distorting it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Uniform scale factor
    pub scale: f32,
    /// Horizontal centering offset within the half
    pub offset_x: f32,
    /// Vertical centering offset
    pub offset_y: f32,
}

/// Compute the letterbox placement of a `width`x`height` page inside a
/// `half_width`x`half_height` target: `scale = min(wx, wy)`, centered both
/// ways, aspect ratio preserved.
pub fn fit_into_half(width: f32, height: f32, half_width: f32, half_height: f32) -> Placement {
    let scale = (half_width / width).min(half_height / height);
    Placement {
        scale,
        offset_x: (half_width - width * scale) / 2.0,
        offset_y: (half_height - height * scale) / 2.0,
    }
}

/// Counters reported after composing one document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ComposeStats {
    /// Source pages processed
    pub source_pages: usize,
    /// Source pages that had a translation entry
    pub translated_pages: usize,
    /// Spread pages written to the output
    pub spread_pages: usize,
    /// Extra spreads caused by translations overflowing one rendered page
    pub overflow_pages: usize,
}

/// Builds the double-width spread document for one paper.
///
/// For every source page `p`, in increasing order:
/// - no translation entry: one spread, left = scaled source page, right blank;
/// - translation entry: render it, then one spread per rendered page, the
///   first pairing the source page with rendered page 0 and each overflow
///   spread repeating the identical left half.
///
/// Every spread carries a divider line at the half boundary and a gray
/// source-page-number footer, so overflow pages stay attributable.
pub struct SpreadComposer {
    page_width: f32,
    page_height: f32,
}

impl SpreadComposer {
    /// Create a composer for the given single-page canvas size
    pub fn new(page_width: f32, page_height: f32) -> Self {
        SpreadComposer {
            page_width,
            page_height,
        }
    }

    /// Compose the spread document in memory.
    ///
    /// Consumes the source document: its pages are embedded once as Form
    /// XObjects and overflow spreads reuse them. Rendered translations are
    /// transient; their bytes are dropped as soon as their pages are
    /// embedded.
    pub fn compose<R: TranslationRenderer>(
        &self,
        source: SourceDocument,
        translations: &TranslationMap,
        renderer: &R,
    ) -> Result<(Document, ComposeStats)> {
        let source_count = source.page_count();

        let mut out = Document::with_version("1.5");
        let pages_id = out.new_object_id();
        let font_id = out.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let source_pages = embed_document_pages(&mut out, source.into_document())
            .context("Failed to embed source pages")?;

        let mut kids: Vec<Object> = Vec::new();
        let mut stats = ComposeStats {
            source_pages: source_count,
            ..ComposeStats::default()
        };

        for (idx, left) in source_pages.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let page_no = (idx + 1) as u32;

            let Some(md_text) = translations.get(&page_no) else {
                debug!("Page {}: no translation, blank right half", page_no);
                self.push_spread(&mut out, pages_id, font_id, left, None, page_no, &mut kids);
                continue;
            };

            let pdf_bytes = renderer
                .render_page(md_text)
                .with_context(|| format!("Failed to render translation for page {}", page_no))?;
            let trans_doc = Document::load_mem(&pdf_bytes)
                .map_err(|e| anyhow!("Rendered PDF for page {} is unreadable: {}", page_no, e))?;
            drop(pdf_bytes);

            let trans_pages = embed_document_pages(&mut out, trans_doc)
                .with_context(|| format!("Failed to embed translation for page {}", page_no))?;

            stats.translated_pages += 1;
            if trans_pages.len() > 1 {
                stats.overflow_pages += trans_pages.len() - 1;
                info!(
                    "Page {} translation overflows to {} rendered pages",
                    page_no,
                    trans_pages.len()
                );
            }

            if trans_pages.is_empty() {
                // A rendered PDF always has a page; tolerate an empty one
                // the same way as a missing translation.
                self.push_spread(&mut out, pages_id, font_id, left, None, page_no, &mut kids);
                continue;
            }

            for right in &trans_pages {
                self.push_spread(
                    &mut out,
                    pages_id,
                    font_id,
                    left,
                    Some(right),
                    page_no,
                    &mut kids,
                );
            }
        }

        stats.spread_pages = kids.len();

        #[allow(clippy::cast_possible_wrap)]
        let count = kids.len() as i64;
        out.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = out.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        out.trailer.set("Root", catalog_id);

        out.prune_objects();
        out.renumber_objects();
        out.compress();

        Ok((out, stats))
    }

    /// Compose and save to a file.
    pub fn compose_to_file<R: TranslationRenderer>(
        &self,
        source: SourceDocument,
        translations: &TranslationMap,
        renderer: &R,
        output_path: &Path,
    ) -> Result<ComposeStats> {
        let (mut doc, stats) = self.compose(source, translations, renderer)?;
        doc.save(output_path)
            .map_err(|e| anyhow!("Failed to save {:?}: {}", output_path, e))?;
        Ok(stats)
    }

    #[allow(clippy::too_many_arguments)]
    fn push_spread(
        &self,
        out: &mut Document,
        pages_id: ObjectId,
        font_id: ObjectId,
        left: &EmbeddedPage,
        right: Option<&EmbeddedPage>,
        page_no: u32,
        kids: &mut Vec<Object>,
    ) {
        let w = self.page_width;
        let h = self.page_height;
        let spread_width = w * 2.0;

        let mut content = String::new();
        let mut xobjects = Dictionary::new();

        // Left half: the source page, letterboxed into [0, w) x [0, h)
        let place = fit_into_half(left.width, left.height, w, h);
        let _ = writeln!(
            content,
            "q {} 0 0 {} {} {} cm /L Do Q",
            place.scale,
            place.scale,
            place.offset_x - left.origin_x * place.scale,
            place.offset_y - left.origin_y * place.scale,
        );
        xobjects.set("L", left.xobject_id);

        // Right half: one page of the rendered translation, or nothing
        if let Some(right) = right {
            let place = fit_into_half(right.width, right.height, w, h);
            let _ = writeln!(
                content,
                "q {} 0 0 {} {} {} cm /R Do Q",
                place.scale,
                place.scale,
                w + place.offset_x - right.origin_x * place.scale,
                place.offset_y - right.origin_y * place.scale,
            );
            xobjects.set("R", right.xobject_id);
        }

        // Divider at the half boundary
        let _ = writeln!(content, "0.8 0.8 0.8 RG 0.8 w {} 0 m {} {} l S", w, w, h);

        // Source page number, bottom-right of the left half
        let _ = writeln!(
            content,
            "BT /F0 {} Tf 0.5 0.5 0.5 rg {} {} Td ({}) Tj ET",
            FOOTER_FONT_SIZE,
            w - FOOTER_INSET_X,
            FOOTER_BASELINE_Y,
            page_no,
        );

        let content_id = out.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = out.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => xobjects,
                "Font" => dictionary! { "F0" => font_id },
            },
            "MediaBox" => Object::Array(vec![
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(spread_width),
                Object::Real(h),
            ]),
        });
        kids.push(Object::Reference(page_id));
    }
}
