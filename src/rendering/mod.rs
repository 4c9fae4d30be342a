/*!
 * Markdown-to-PDF rendering pipeline.
 *
 * This module turns one page's translated markdown into a standalone PDF:
 * - `html`: math-safe markdown-to-HTML conversion and the page template
 * - `browser`: the shared headless-browser session and the print call
 * - `page_renderer`: the renderer facade consumed by the composer
 */

pub mod browser;
pub mod html;
pub mod page_renderer;

pub use browser::RenderSession;
pub use page_renderer::{PageRenderer, TranslationRenderer};
