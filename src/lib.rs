/*!
 * # dualdoc - bilingual paper review PDF generator
 *
 * A Rust library for turning academic papers into page-aligned bilingual
 * review documents.
 *
 * ## Features
 *
 * - Merge page-by-page translation fragments (`<!-- PAGE N -->` markers)
 * - Protect LaTeX math spans through markdown-to-HTML conversion
 * - Render translated pages to PDF via a shared headless-browser session
 * - Compose double-width "original | translation" spread PDFs with
 *   overflow handling and page-number footers
 * - Render a condensed summary markdown to a standalone PDF
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `workspace`: Workspace directory layout and paper discovery
 * - `math_protect`: Reversible math-span escaping
 * - `translation_merger`: Page-marker tokenizing and fragment merging
 * - `rendering`: Markdown-to-PDF pipeline:
 *   - `rendering::html`: Markdown conversion and the page template
 *   - `rendering::browser`: Headless-browser session
 *   - `rendering::page_renderer`: Renderer facade and composer seam
 * - `compose`: Spread composition:
 *   - `compose::source_doc`: Source paper view
 *   - `compose::embed`: Page-to-XObject embedding
 *   - `compose::spread`: The spread state machine
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod compose;
pub mod errors;
pub mod file_utils;
pub mod math_protect;
pub mod rendering;
pub mod translation_merger;
pub mod workspace;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, Mode};
pub use compose::{ComposeStats, SourceDocument, SpreadComposer};
pub use errors::{AppError, ComposeError, RenderError};
pub use math_protect::{protect_math, restore_math};
pub use translation_merger::{TranslationMap, merge_fragment_files, parse_fragments};
pub use workspace::Workspace;
