/*!
 * End-to-end spread composition over a real workspace layout, with the
 * browser stage mocked out
 */

use lopdf::Document;
use std::fs;
use tempfile::TempDir;

use dualdoc::compose::{SourceDocument, SpreadComposer};
use dualdoc::translation_merger::merge_fragment_files;
use dualdoc::workspace::Workspace;

use crate::common::{MockRenderer, build_test_pdf, init_test_logging};

const PAGE_W: f32 = 595.28;
const PAGE_H: f32 = 841.89;

/// Build a workspace directory with one paper and its translation fragments
fn build_workspace(paper_pages: usize, fragments: &[(&str, &str)]) -> TempDir {
    init_test_logging();
    let dir = TempDir::new().expect("temp workspace");

    let papers = dir.path().join("papers");
    fs::create_dir(&papers).expect("create papers dir");
    fs::write(
        papers.join("sample.pdf"),
        build_test_pdf(paper_pages, PAGE_W, PAGE_H),
    )
    .expect("write paper");

    let translations = dir.path().join("translations");
    fs::create_dir(&translations).expect("create translations dir");
    for (file_name, content) in fragments {
        fs::write(translations.join(file_name), content).expect("write fragment");
    }

    dir
}

/// Test the discover -> merge -> compose -> save chain end to end
#[test]
fn test_workflow_withTranslatedPaper_shouldProduceSpreadPdf() {
    let dir = build_workspace(
        3,
        &[
            ("sample_p1-2.md", "<!-- PAGE 1 -->\n1\n<!-- PAGE 2 -->\n1\n"),
            ("sample_p3.md", "<!-- PAGE 3 -->\n1\n"),
        ],
    );
    let workspace = Workspace::new(dir.path());

    let papers = workspace.discover_papers().expect("discovery");
    assert_eq!(papers, vec!["sample"]);

    let fragments = workspace.fragment_files("sample").expect("fragments");
    assert_eq!(fragments.len(), 2);

    let translations = merge_fragment_files(&fragments).expect("merge");
    assert_eq!(translations.len(), 3);

    fs::create_dir_all(workspace.output_dir()).expect("output dir");
    let source = SourceDocument::open(workspace.paper_path("sample")).expect("open source");

    let composer = SpreadComposer::new(PAGE_W, PAGE_H);
    let output_path = workspace.dual_output_path("sample");
    let stats = composer
        .compose_to_file(source, &translations, &MockRenderer, &output_path)
        .expect("compose");

    assert_eq!(stats.source_pages, 3);
    assert_eq!(stats.translated_pages, 3);
    assert_eq!(stats.spread_pages, 3);

    let reloaded = Document::load(&output_path).expect("output reloads");
    assert_eq!(reloaded.get_pages().len(), 3);
}

/// Test a paper with more pages than translations still covers every page
#[test]
fn test_workflow_withSparseTranslations_shouldCoverEverySourcePage() {
    let dir = build_workspace(4, &[("sample_p2.md", "notes\n<!-- PAGE 2 -->\n2\n")]);
    let workspace = Workspace::new(dir.path());

    let fragments = workspace.fragment_files("sample").expect("fragments");
    let translations = merge_fragment_files(&fragments).expect("merge");
    assert_eq!(translations.len(), 1);

    fs::create_dir_all(workspace.output_dir()).expect("output dir");
    let source = SourceDocument::open(workspace.paper_path("sample")).expect("open source");

    let composer = SpreadComposer::new(PAGE_W, PAGE_H);
    let (doc, stats) = composer
        .compose(source, &translations, &MockRenderer)
        .expect("compose");

    // Page 2 renders to two pages, so one overflow spread joins the four
    assert_eq!(stats.source_pages, 4);
    assert_eq!(stats.spread_pages, 5);
    assert_eq!(stats.overflow_pages, 1);
    assert_eq!(doc.get_pages().len(), 5);
}
