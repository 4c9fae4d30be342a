/*!
 * Common test utilities for the dualdoc test suite
 */

use anyhow::Result;
use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use std::io::Write;
use tempfile::NamedTempFile;

use dualdoc::rendering::TranslationRenderer;

/// Build a minimal multi-page PDF in memory.
///
/// Every page shares one Helvetica font resource and carries a one-line
/// text content stream, enough for embedding and page-count assertions.
pub fn build_test_pdf(page_count: usize, width: f32, height: f32) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for index in 0..page_count {
        let content = format!("BT /F1 12 Tf 72 720 Td (Page {}) Tj ET", index + 1);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => Object::Array(vec![
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(width),
                Object::Real(height),
            ]),
        });
        kids.push(Object::Reference(page_id));
    }

    #[allow(clippy::cast_possible_wrap)]
    let count = page_count as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut output = Vec::new();
    doc.save_to(&mut output).expect("failed to serialize test PDF");
    output
}

/// Write PDF bytes to a named temporary file (kept alive by the handle).
pub fn write_temp_pdf(bytes: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".pdf")
        .tempfile()
        .expect("failed to create temp PDF");
    file.write_all(bytes).expect("failed to write temp PDF");
    file.flush().expect("failed to flush temp PDF");
    file
}

/// Route log output through the test harness; repeated calls are no-ops.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Renderer stand-in that fabricates A4 PDFs without a browser.
///
/// The "markdown" it receives is interpreted as the number of pages the
/// rendered translation should have (default 1), which lets tests drive
/// overflow scenarios precisely.
pub struct MockRenderer;

impl TranslationRenderer for MockRenderer {
    fn render_page(&self, md_text: &str) -> Result<Vec<u8>> {
        let pages = md_text.trim().parse::<usize>().unwrap_or(1);
        Ok(build_test_pdf(pages.max(1), 595.28, 841.89))
    }
}

/// Renderer stand-in that always fails, for failure-policy tests.
pub struct FailingRenderer;

impl TranslationRenderer for FailingRenderer {
    fn render_page(&self, _md_text: &str) -> Result<Vec<u8>> {
        Err(anyhow::anyhow!("render backend unavailable"))
    }
}
